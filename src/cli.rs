//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use crate::constants::DEFAULT_BIT_DEPTH;

/// 一款基于位平面 LSB (最低有效位) 隐写术的命令行工具，用于在无损格式图像 (如 PNG, BMP) 中隐藏或恢复数据。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于位平面 LSB (最低有效位) 隐写术的命令行工具，用于在无损格式图像 (如 PNG, BMP) 中隐藏或恢复数据。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：encode (嵌入) 和 decode (提取)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 将文本或文件内容嵌入无损格式图像 (如 PNG, BMP) 的低位位平面。
    Encode(EncodeArgs),

    /// 从经过隐写的图像中提取隐藏的数据。
    Decode(DecodeArgs),
}

/// 'encode' 命令所需的参数。
#[derive(Parser, Debug)]
#[command(group = ArgGroup::new("payload").required(true).multiple(false))]
pub struct EncodeArgs {
    /// 用于隐写的输入图像文件路径 (如 PNG, BMP)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的内联文本消息。与 --text 二选一。
    #[arg(short, long, group = "payload")]
    pub message: Option<String>,

    /// 要隐藏的内容的文件路径 (按原始字节处理)。与 --message 二选一。
    #[arg(short, long, group = "payload")]
    pub text: Option<PathBuf>,

    /// 隐写完成后，保存结果图像的输出路径。
    /// 省略时在输入图像旁生成 `<原文件名>_encoded.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 每个通道用于存储的低位位平面数 (1-8)。
    /// 编码与解码必须使用相同的值。
    #[arg(short, long, default_value_t = DEFAULT_BIT_DEPTH, value_parser = clap::value_parser!(u8).range(1..=8))]
    pub bits: u8,

    /// 目标文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'decode' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// 已隐藏数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 提取数据后，保存内容的输出路径。
    /// 省略时将恢复的消息打印到标准输出。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 每个通道用于存储的低位位平面数 (1-8)，必须与编码时一致。
    #[arg(short, long, default_value_t = DEFAULT_BIT_DEPTH, value_parser = clap::value_parser!(u8).range(1..=8))]
    pub bits: u8,

    /// 目标文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}
