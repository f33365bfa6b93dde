//! 重组器实现模块.

pub mod aac;
pub mod h264;
pub mod mpeg4;
pub mod passthrough;

use crate::codec_id::CodecId;
use crate::registry::ReframerRegistry;

/// 注册所有内置重组器
pub fn register_all_reframers(registry: &mut ReframerRegistry) {
    registry.register_reframer(CodecId::H264, "h264", h264::H264Reframer::create);
    registry.register_reframer(CodecId::Mpeg4, "mpeg4", mpeg4::Mpeg4Reframer::create);
    registry.register_reframer(CodecId::Aac, "aac", aac::AacReframer::create);
    registry.register_reframer(
        CodecId::G729,
        "g729",
        passthrough::PassthroughReframer::new_g729,
    );
}
