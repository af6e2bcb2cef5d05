/// 标记载荷结束的哨兵字节序列。
/// 编码时追加在载荷末尾，解码时扫描到它即截断。
/// 编码端与解码端必须使用完全相同的序列，不可配置。
pub const SENTINEL: &[u8; 5] = b"=====";

/// 每个像素参与隐写的通道数 (R, G, B)。
pub const CHANNELS: usize = 3;

/// 默认使用的低位位平面数。
/// 2 bits 在容量与视觉失真之间取得平衡。
pub const DEFAULT_BIT_DEPTH: u8 = 2;

/// 每通道可用位平面数的下限。
pub const MIN_BIT_DEPTH: u8 = 1;

/// 每通道可用位平面数的上限 (u8 共 8 bits)。
pub const MAX_BIT_DEPTH: u8 = 8;
