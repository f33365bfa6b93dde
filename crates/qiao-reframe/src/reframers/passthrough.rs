//! 直通重组器.
//!
//! 适用于不需要任何投递前适配的码流 (如 G.729): 载荷原样转发,
//! 协商得到的配置记录按默认行为丢弃.

use qiao_core::QiaoResult;

use crate::buffer::Packet;
use crate::codec_id::CodecId;
use crate::reframer::Reframer;

/// 直通重组器
///
/// 按编解码器标识实例化, 同一实现可服务多种无适配需求的码流.
pub struct PassthroughReframer {
    /// 对应的编解码器标识
    codec_id: CodecId,
}

impl PassthroughReframer {
    /// 创建指定编解码器的直通重组器
    fn create(codec_id: CodecId) -> QiaoResult<Box<dyn Reframer>> {
        Ok(Box::new(Self { codec_id }))
    }

    /// G.729 工厂函数
    pub fn new_g729() -> QiaoResult<Box<dyn Reframer>> {
        Self::create(CodecId::G729)
    }
}

impl Reframer for PassthroughReframer {
    fn codec_id(&self) -> CodecId {
        self.codec_id
    }

    fn name(&self) -> &str {
        self.codec_id.name()
    }

    // reframe_config 使用默认实现: 丢弃配置记录

    fn reframe_payload(&mut self, packet: Packet) -> QiaoResult<Vec<Packet>> {
        Ok(vec![packet])
    }
}
