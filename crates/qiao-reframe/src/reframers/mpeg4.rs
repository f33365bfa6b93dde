//! MPEG-4 Part 2 码流重组器.
//!
//! 解码组件需要在首个载荷缓冲之前单独收到 VOS/VOL 头, 即协商携带的
//! 配置记录. 本重组器在配置阶段把配置记录原样作为独立缓冲先行投递,
//! 载荷不做任何变换.

use log::debug;
use qiao_core::QiaoResult;

use crate::buffer::Packet;
use crate::codec_id::CodecId;
use crate::reframer::Reframer;

/// MPEG-4 Part 2 重组器
pub struct Mpeg4Reframer;

impl Mpeg4Reframer {
    /// 注册表工厂函数
    pub fn create() -> QiaoResult<Box<dyn Reframer>> {
        Ok(Box::new(Self))
    }
}

impl Reframer for Mpeg4Reframer {
    fn codec_id(&self) -> CodecId {
        CodecId::Mpeg4
    }

    fn name(&self) -> &str {
        CodecId::Mpeg4.name()
    }

    fn reframe_config(&mut self, codec_data: Packet) -> QiaoResult<Vec<Packet>> {
        debug!(
            "mpeg4 配置记录作为独立缓冲先行投递: {} 字节",
            codec_data.size()
        );
        Ok(vec![codec_data])
    }

    fn reframe_payload(&mut self, packet: Packet) -> QiaoResult<Vec<Packet>> {
        Ok(vec![packet])
    }
}
