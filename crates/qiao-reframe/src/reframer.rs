//! 重组器 trait 定义.
//!
//! 所有码流适配策略实现必须实现 `Reframer` trait.

use log::debug;
use qiao_core::QiaoResult;

use crate::buffer::Packet;
use crate::codec_id::CodecId;

/// 重组器 trait
///
/// 定义投递前码流适配的两阶段接口. 所有具体重组器 (H.264, AAC 等)
/// 都实现此 trait.
///
/// 适配流程:
/// 1. 协商阶段: 每当上游协商出新的编解码配置, 调用 `reframe_config()`,
///    产出先于载荷投递的配置缓冲序列
/// 2. 变换阶段: 每个上游缓冲调用一次 `reframe_payload()`,
///    产出按序投递的输出缓冲序列
///
/// 两个阶段都是同步调用, 一次输入对应一次完整输出, 无挂起或重试.
/// 输出为原子语义: 返回 `Err` 时不产出任何缓冲.
pub trait Reframer: Send {
    /// 获取重组器对应的编解码器标识
    fn codec_id(&self) -> CodecId;

    /// 获取重组器名称
    fn name(&self) -> &str;

    /// 变换编解码配置记录
    ///
    /// 输入配置记录的所有权, 配置只会被消费一次.
    /// 默认实现丢弃配置并返回空序列, 适用于不需要配置前置处理的码流.
    ///
    /// # 返回
    /// 先于任何载荷缓冲投递的配置缓冲序列
    fn reframe_config(&mut self, codec_data: Packet) -> QiaoResult<Vec<Packet>> {
        debug!(
            "{} 重组器不处理配置记录, 丢弃 {} 字节",
            self.name(),
            codec_data.size()
        );
        Ok(Vec::new())
    }

    /// 变换一个上游缓冲
    ///
    /// # 参数
    /// - `packet`: 上游缓冲, 所有权移入. 空缓冲是合法输入.
    ///
    /// # 返回
    /// 按投递顺序排列的输出缓冲序列, 允许为空 (本次输入无产出)
    fn reframe_payload(&mut self, packet: Packet) -> QiaoResult<Vec<Packet>>;
}
