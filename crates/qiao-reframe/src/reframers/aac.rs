//! AAC 码流重组器.
//!
//! 部分解码组件不提供独立的配置下发通道, 要求 AudioSpecificConfig
//! 与首帧音频数据合并为一个缓冲送入. 本重组器在协商阶段暂存配置
//! 字节, 在其后第一个载荷缓冲前拼接; 合并缓冲继承该载荷的元信息.

use bytes::{Bytes, BytesMut};
use log::debug;
use qiao_core::QiaoResult;

use crate::buffer::Packet;
use crate::codec_id::CodecId;
use crate::reframer::Reframer;

/// AAC 重组器
///
/// 有状态: 协商产生的配置字节暂存于 `pending_config`,
/// 由下一个载荷缓冲一次性消费. 重复协商只保留最新配置.
pub struct AacReframer {
    /// 待拼接的配置字节
    pending_config: Option<Bytes>,
}

impl AacReframer {
    /// 注册表工厂函数
    pub fn create() -> QiaoResult<Box<dyn Reframer>> {
        Ok(Box::new(Self {
            pending_config: None,
        }))
    }
}

impl Reframer for AacReframer {
    fn codec_id(&self) -> CodecId {
        CodecId::Aac
    }

    fn name(&self) -> &str {
        CodecId::Aac.name()
    }

    fn reframe_config(&mut self, codec_data: Packet) -> QiaoResult<Vec<Packet>> {
        debug!(
            "aac 暂存配置 {} 字节, 等待下一个载荷缓冲",
            codec_data.size()
        );
        self.pending_config = Some(codec_data.data);
        Ok(Vec::new())
    }

    fn reframe_payload(&mut self, packet: Packet) -> QiaoResult<Vec<Packet>> {
        let Some(config) = self.pending_config.take() else {
            return Ok(vec![packet]);
        };

        let mut merged = BytesMut::with_capacity(config.len() + packet.size());
        merged.extend_from_slice(&config);
        merged.extend_from_slice(&packet.data);

        debug!(
            "aac 配置与首帧合并: config={} 字节, frame={} 字节",
            config.len(),
            packet.size()
        );

        let mut out = Packet::from_data(merged.freeze());
        out.copy_metadata_from(&packet);
        Ok(vec![out])
    }
}
