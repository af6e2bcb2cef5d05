//! # 命令处理逻辑模块
//!
//! 包含处理 `encode` 和 `decode` 子命令的高级业务逻辑。
//! 本模块负责协调图像文件 I/O、调用核心编解码算法以及向用户报告结果。
//! 核心算法本身不做任何 I/O，所有文件读写都集中在这里。

use crate::cli::{DecodeArgs, EncodeArgs};
use crate::steganography::{BitDepth, Payload, embed, extract};
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// 处理 'Encode' 命令的执行逻辑。
///
/// 负责解码输入图像、组装载荷 (内联消息或文件内容)、调用核心嵌入函数，
/// 最后将结果图像以无损格式写入目标路径。
/// 输出格式由目标路径的扩展名决定；本工具只编译了无损格式支持，
/// 有损格式会在保存阶段直接报错。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径、载荷来源和位平面数的 `EncodeArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取或解码输入的图像文件，或无法读取载荷文件。
/// * 位平面数不在 1 到 8 之间。
/// * 图像容量不足以容纳载荷与哨兵。
/// * 目标文件已存在且未指定 `--force`。
/// * 无法写入到目标图像文件。
pub fn handle_encode(args: EncodeArgs) -> Result<()> {
    let mut picture = image::open(&args.image)
        .with_context(|| {
            format!(
                "Unable to read image file: {}",
                args.image.to_string_lossy().red().bold()
            )
        })?
        .to_rgb8();

    let payload = if let Some(message) = &args.message {
        Payload::Text(message.clone())
    } else if let Some(path) = &args.text {
        Payload::Bytes(fs::read(path).with_context(|| {
            format!(
                "Unable to read text file: {}",
                path.to_string_lossy().red().bold()
            )
        })?)
    } else {
        // clap 的参数组保证二者必有其一，这里只为库调用方兜底。
        anyhow::bail!("Either --message or --text must be provided.");
    };

    let depth = BitDepth::new(args.bits)?;

    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| default_dest(&args.image));

    anyhow::ensure!(
        args.force || !dest.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        dest.to_string_lossy().red().bold()
    );

    embed(&mut picture, &payload, depth).with_context(|| {
        format!(
            "Failed to hide the payload in '{}'.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    picture.save(&dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The data has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Decode' 命令的执行逻辑。
///
/// 负责解码经过隐写的图像文件、调用核心提取函数恢复隐藏的数据，
/// 最后将数据写入目标文件，或在未指定输出路径时打印到标准输出。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径和位平面数的 `DecodeArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取或解码输入的图像文件。
/// * 位平面数不在 1 到 8 之间。
/// * 扫描完整幅图像仍未出现哨兵 (图像未经编码或位平面数不匹配)。
/// * 目标文件已存在且未指定 `--force`，或无法写入目标文件。
pub fn handle_decode(args: DecodeArgs) -> Result<()> {
    let picture = image::open(&args.image)
        .with_context(|| {
            format!(
                "Unable to read image file: {}",
                args.image.to_string_lossy().red().bold()
            )
        })?
        .to_rgb8();

    let depth = BitDepth::new(args.bits)?;

    let data = extract(&picture, depth).with_context(|| {
        format!(
            "Failed to recover hidden data from '{}'.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    match &args.text {
        Some(path) => {
            anyhow::ensure!(
                args.force || !path.exists(),
                "Output file already exists: {}. \nUse --force to overwrite it.",
                path.to_string_lossy().red().bold()
            );

            fs::write(path, &data).with_context(|| {
                format!(
                    "Unable to write to target text file: {}",
                    path.to_string_lossy().red().bold()
                )
            })?;

            println!(
                "The data has been successfully recovered and saved: {}",
                path.to_string_lossy().green().bold()
            );
        }
        None => {
            // 打印时按 UTF-8 宽松解码；如需逐字节保真请改用 --text 输出到文件。
            println!(
                "Decoded message: {}",
                String::from_utf8_lossy(&data).green()
            );
        }
    }

    Ok(())
}

/// 根据输入图像路径生成默认的输出路径：`<原文件名>_encoded.png`。
fn default_dest(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map_or_else(|| "image".to_string(), |s| s.to_string_lossy().into_owned());

    image.with_file_name(format!("{stem}_encoded.png"))
}
