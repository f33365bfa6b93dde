//! 统一错误类型定义.
//!
//! 所有 Qiao crate 共用的错误类型, 支持跨模块传播.
//! 解析类错误携带结构化字段 (偏移、长度), 便于调用方精确定位损坏位置.

use thiserror::Error;

/// Qiao 框架统一错误类型
#[derive(Debug, Error)]
pub enum QiaoError {
    /// 配置记录长度不足以容纳固定头部
    #[error("AVC 配置记录过短: len={len}, 最少需要 {min} 字节")]
    MalformedRecord { len: usize, min: usize },

    /// 配置记录在参数集区域截断
    ///
    /// `section` 指明截断发生在哪个区域 (SPS、PPS 或计数字段),
    /// `needed` 与 `remaining` 分别为该位置所需与实际剩余的字节数.
    #[error("AVC 配置记录截断: {section}, offset={offset}, 需要 {needed} 字节, 剩余 {remaining} 字节")]
    TruncatedRecord {
        section: &'static str,
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// 访问单元在 NAL 单元边界处截断
    #[error("访问单元截断: offset={offset}, 需要 {needed} 字节, 剩余 {remaining} 字节")]
    TruncatedAccessUnit {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// NAL 长度字段为零
    ///
    /// 合法的 AVC 码流不会出现零长度 NAL 单元, 视为数据损坏.
    #[error("非法 NAL 长度: offset={offset}, 长度字段为 0")]
    MalformedNalLength { offset: usize },

    /// 未找到指定编解码器的重组器
    #[error("未找到重组器: {0}")]
    ReframerNotFound(String),
}

/// Qiao 框架统一 Result 类型
pub type QiaoResult<T> = Result<T, QiaoError>;
