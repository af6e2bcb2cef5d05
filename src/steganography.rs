use image::RgbImage;
use thiserror::Error;

use crate::constants::{CHANNELS, DEFAULT_BIT_DEPTH, MAX_BIT_DEPTH, MIN_BIT_DEPTH, SENTINEL};

/// 核心编解码过程中可能出现的错误。
#[derive(Debug, Error)]
pub enum StegoError {
    #[error(
        "Insufficient capacity: the payload needs {required} bytes but the image can only hold {available} bytes at this bit depth."
    )]
    InsufficientCapacity { required: usize, available: usize },

    #[error("Invalid bit depth {0}: expected a value between 1 and 8.")]
    InvalidBitDepth(u8),

    #[error(
        "No sentinel found: the image does not contain a hidden message, or the bit depth does not match the one used for encoding."
    )]
    SentinelNotFound,
}

/// 每通道参与隐写的低位位平面数，取值范围 [1, 8]。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitDepth(u8);

impl BitDepth {
    pub fn new(bits: u8) -> Result<Self, StegoError> {
        if (MIN_BIT_DEPTH..=MAX_BIT_DEPTH).contains(&bits) {
            Ok(Self(bits))
        } else {
            Err(StegoError::InvalidBitDepth(bits))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for BitDepth {
    fn default() -> Self {
        Self(DEFAULT_BIT_DEPTH)
    }
}

impl TryFrom<u8> for BitDepth {
    type Error = StegoError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        Self::new(bits)
    }
}

/// 待嵌入的载荷：内联文本或原始字节序列。
#[derive(Debug, Clone)]
pub enum Payload {
    Text(String),
    Bytes(Vec<u8>),
}

impl Payload {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Payload::Text(text) => text.as_bytes(),
            Payload::Bytes(bytes) => bytes,
        }
    }
}

/// 给定图像尺寸与位平面数，计算可嵌入的最大字节数 (向下取整)。
pub fn capacity_bytes(width: u32, height: u32, depth: BitDepth) -> usize {
    (u64::from(width) * u64::from(height) * CHANNELS as u64 * u64::from(depth.get()) / 8) as usize
}

/// 将载荷连同哨兵逐位写入图像的低位位平面，原地修改。
///
/// 遍历顺序：先最低位平面，平面内按行优先遍历像素，像素内按 R, G, B
/// 遍历通道；载荷写完后立即停止，其余通道保持不变。
/// 容量检查先于任何写入；检查失败时图像保持原样。
///
/// 注意：若载荷本身含有哨兵序列 `=====`，解码将在其首次出现处提前截断。
pub fn embed(image: &mut RgbImage, payload: &Payload, depth: BitDepth) -> Result<(), StegoError> {
    let data = payload.as_bytes();
    let available = capacity_bytes(image.width(), image.height(), depth);
    let required = data.len() + SENTINEL.len();

    if required > available {
        return Err(StegoError::InsufficientCapacity {
            required,
            available,
        });
    }

    let bits = to_bits(data.iter().chain(SENTINEL.iter()));
    let mut cursor = 0;

    'planes: for plane in 0..depth.get() {
        let mask = 1u8 << plane;
        for pixel in image.pixels_mut() {
            for channel in pixel.0.iter_mut() {
                if cursor == bits.len() {
                    break 'planes;
                }
                // 只替换当前平面上的那一位，通道的其余位保持不变。
                *channel = (*channel & !mask) | (bits[cursor] << plane);
                cursor += 1;
            }
        }
    }

    Ok(())
}

/// 按与编码相同的遍历顺序提取低位位平面，重组字节并在首个哨兵处截断。
///
/// 与编码不同，提取必须扫描整幅图像，因为载荷长度事先未知。
/// 扫描完毕仍未出现哨兵时返回 [`StegoError::SentinelNotFound`]，
/// 通常意味着图像未经编码或位平面数不匹配。
pub fn extract(image: &RgbImage, depth: BitDepth) -> Result<Vec<u8>, StegoError> {
    let mut bits = Vec::with_capacity(capacity_bytes(image.width(), image.height(), depth) * 8);

    for plane in 0..depth.get() {
        for pixel in image.pixels() {
            for channel in pixel.0.iter() {
                bits.push((channel >> plane) & 1);
            }
        }
    }

    let bytes = to_bytes(&bits);
    let end = bytes
        .windows(SENTINEL.len())
        .position(|window| window == SENTINEL)
        .ok_or(StegoError::SentinelNotFound)?;

    Ok(bytes[..end].to_vec())
}

// 每个字节展开为 8 个 bit，最高位在前。
fn to_bits<'a>(bytes: impl Iterator<Item = &'a u8>) -> Vec<u8> {
    bytes
        .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 1))
        .collect()
}

// 每 8 个 bit 合并为一个字节，末尾不足 8 bit 的部分丢弃。
fn to_bytes(bits: &[u8]) -> Vec<u8> {
    bits.chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | bit))
        .collect()
}
