//! 流会话: 协商状态、重组器与下游的组合点.

use log::{debug, warn};
use qiao_core::QiaoResult;

use crate::buffer::Packet;
use crate::reframer::Reframer;
use crate::sink::{BufferSink, DeliveryStatus};

/// 流会话
///
/// 将一路码流的重组器、下游和协商得到的配置记录组合为完整的投递
/// 流水线. 会话只持有这三样状态; 配置记录保存在 `Option` 中,
/// 每次协商整体替换, 在下一次 `push()` 时一次性消费.
///
/// 投递状态对会话仅作记录: 非成功状态写入日志并原样返回,
/// 不中断本次 push 的后续投递, 也不转化为错误.
/// 重组阶段的解析错误与下游的投递失败因此严格分离.
pub struct StreamSession<S: BufferSink> {
    /// 重组器
    reframer: Box<dyn Reframer>,
    /// 下游
    sink: S,
    /// 协商得到的配置记录, 待消费
    codec_data: Option<Packet>,
}

impl<S: BufferSink> StreamSession<S> {
    /// 创建会话
    pub fn new(reframer: Box<dyn Reframer>, sink: S) -> Self {
        Self {
            reframer,
            sink,
            codec_data: None,
        }
    }

    /// 协商配置记录
    ///
    /// 整体替换当前持有的配置: 旧配置在此处被丢弃, `None` 表示清除.
    /// 可在流中途任意次调用, 新配置在下一次 `push()` 时生效.
    pub fn negotiate(&mut self, codec_data: Option<Packet>) {
        match &codec_data {
            Some(cfg) => debug!(
                "{} 会话协商新配置: size={}, pts={}",
                self.reframer.name(),
                cfg.size(),
                cfg.timestamp()
            ),
            None => debug!("{} 会话清除配置", self.reframer.name()),
        }
        self.codec_data = codec_data;
    }

    /// 是否存在待消费的配置记录
    pub fn has_pending_config(&self) -> bool {
        self.codec_data.is_some()
    }

    /// 送入一个上游缓冲
    ///
    /// 若存在待消费的配置记录, 先取出并经配置阶段重组投递; 配置只
    /// 消费一次, 阶段失败也不回填 (损坏的记录重试不会成功).
    /// 随后对输入缓冲执行变换阶段并投递.
    ///
    /// # 返回
    /// - `Ok(status)`: 最后一个投递缓冲的状态, 本次无投递时为 `Ok`
    /// - `Err(e)`: 某个重组阶段失败, 该阶段不产生任何投递
    pub fn push(&mut self, packet: Packet) -> QiaoResult<DeliveryStatus> {
        let mut last = DeliveryStatus::Ok;

        if let Some(cfg) = self.codec_data.take() {
            let config_bufs = self.reframer.reframe_config(cfg)?;
            debug!(
                "{} 配置阶段产出 {} 个缓冲",
                self.reframer.name(),
                config_bufs.len()
            );
            for buf in config_bufs {
                last = self.deliver(buf);
            }
        }

        let payload_bufs = self.reframer.reframe_payload(packet)?;
        for buf in payload_bufs {
            last = self.deliver(buf);
        }
        Ok(last)
    }

    /// 访问下游
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// 消费会话, 取回下游
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// 投递单个缓冲并记录状态
    fn deliver(&mut self, packet: Packet) -> DeliveryStatus {
        let size = packet.size();
        let ts = packet.timestamp();
        let status = self.sink.deliver(packet);
        if !status.is_ok() {
            warn!(
                "{} 下游投递返回非成功状态: status={}, size={}, pts={}, 继续处理",
                self.reframer.name(),
                status,
                size,
                ts
            );
        }
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec_id::CodecId;
    use crate::sink::CollectSink;
    use qiao_core::{QiaoError, QiaoResult};

    /// 测试用重组器: 配置原样回显为一个缓冲, 载荷复制为两个缓冲
    struct EchoReframer {
        fail_config: bool,
        fail_payload: bool,
    }

    impl EchoReframer {
        fn new() -> Self {
            Self {
                fail_config: false,
                fail_payload: false,
            }
        }
    }

    impl Reframer for EchoReframer {
        fn codec_id(&self) -> CodecId {
            CodecId::G729
        }

        fn name(&self) -> &str {
            "echo"
        }

        fn reframe_config(&mut self, codec_data: Packet) -> QiaoResult<Vec<Packet>> {
            if self.fail_config {
                return Err(QiaoError::MalformedRecord { len: 0, min: 6 });
            }
            Ok(vec![codec_data])
        }

        fn reframe_payload(&mut self, packet: Packet) -> QiaoResult<Vec<Packet>> {
            if self.fail_payload {
                return Err(QiaoError::MalformedNalLength { offset: 0 });
            }
            Ok(vec![packet.clone(), packet])
        }
    }

    /// 计数型下游: 固定返回指定状态
    struct StatusSink {
        status: DeliveryStatus,
        attempts: usize,
    }

    impl BufferSink for StatusSink {
        fn deliver(&mut self, _packet: Packet) -> DeliveryStatus {
            self.attempts += 1;
            self.status
        }
    }

    #[test]
    fn test_配置只消费一次() {
        let mut session = StreamSession::new(Box::new(EchoReframer::new()), CollectSink::new());
        session.negotiate(Some(Packet::from_data(vec![0xAAu8])));
        assert!(session.has_pending_config());

        session.push(Packet::from_data(vec![0x01u8])).unwrap();
        assert!(!session.has_pending_config());
        // 配置回显 1 个 + 载荷复制 2 个
        assert_eq!(session.sink().received.len(), 3);

        session.push(Packet::from_data(vec![0x02u8])).unwrap();
        // 第二次 push 不再有配置阶段
        assert_eq!(session.sink().received.len(), 5);
    }

    #[test]
    fn test_协商整体替换() {
        let mut session = StreamSession::new(Box::new(EchoReframer::new()), CollectSink::new());
        session.negotiate(Some(Packet::from_data(vec![0xAAu8])));
        session.negotiate(Some(Packet::from_data(vec![0xBBu8])));

        session.push(Packet::from_data(vec![0x01u8])).unwrap();
        // 配置阶段投递的是最新协商的记录
        assert_eq!(session.sink().received[0].data.as_ref(), &[0xBB]);
    }

    #[test]
    fn test_协商清除配置() {
        let mut session = StreamSession::new(Box::new(EchoReframer::new()), CollectSink::new());
        session.negotiate(Some(Packet::from_data(vec![0xAAu8])));
        session.negotiate(None);
        assert!(!session.has_pending_config());

        session.push(Packet::from_data(vec![0x01u8])).unwrap();
        // 无配置阶段, 只有载荷的两个复制
        assert_eq!(session.sink().received.len(), 2);
    }

    #[test]
    fn test_投递失败不中断() {
        let sink = StatusSink {
            status: DeliveryStatus::Error,
            attempts: 0,
        };
        let mut session = StreamSession::new(Box::new(EchoReframer::new()), sink);
        session.negotiate(Some(Packet::from_data(vec![0xAAu8])));

        let status = session.push(Packet::from_data(vec![0x01u8])).unwrap();
        // 投递失败不是错误, 返回最后一个状态
        assert_eq!(status, DeliveryStatus::Error);
        // 三个缓冲全部尝试投递
        assert_eq!(session.sink().attempts, 3);

        // 后续 push 不受影响
        let status = session.push(Packet::from_data(vec![0x02u8])).unwrap();
        assert_eq!(status, DeliveryStatus::Error);
        assert_eq!(session.sink().attempts, 5);
    }

    #[test]
    fn test_无投递时返回成功状态() {
        struct SilentReframer;
        impl Reframer for SilentReframer {
            fn codec_id(&self) -> CodecId {
                CodecId::G729
            }
            fn name(&self) -> &str {
                "silent"
            }
            fn reframe_payload(&mut self, _packet: Packet) -> QiaoResult<Vec<Packet>> {
                Ok(Vec::new())
            }
        }

        let sink = StatusSink {
            status: DeliveryStatus::Error,
            attempts: 0,
        };
        let mut session = StreamSession::new(Box::new(SilentReframer), sink);
        let status = session.push(Packet::empty()).unwrap();
        assert_eq!(status, DeliveryStatus::Ok);
        assert_eq!(session.sink().attempts, 0);
    }

    #[test]
    fn test_配置解析失败即消费() {
        let reframer = EchoReframer {
            fail_config: true,
            fail_payload: false,
        };
        let mut session = StreamSession::new(Box::new(reframer), CollectSink::new());
        session.negotiate(Some(Packet::from_data(vec![0xAAu8])));

        let result = session.push(Packet::from_data(vec![0x01u8]));
        assert!(result.is_err());
        // 失败的配置不回填, 本次 push 无任何投递
        assert!(!session.has_pending_config());
        assert_eq!(session.sink().received.len(), 0);

        // 下一次 push 只走载荷阶段, 正常投递
        session.push(Packet::from_data(vec![0x02u8])).unwrap();
        assert_eq!(session.sink().received.len(), 2);
    }

    #[test]
    fn test_载荷解析失败时配置阶段已投递() {
        let reframer = EchoReframer {
            fail_config: false,
            fail_payload: true,
        };
        let mut session = StreamSession::new(Box::new(reframer), CollectSink::new());
        session.negotiate(Some(Packet::from_data(vec![0xAAu8])));

        let result = session.push(Packet::from_data(vec![0x01u8]));
        assert!(result.is_err());
        // 配置阶段的缓冲已投递, 失败的载荷阶段不产生投递
        assert_eq!(session.sink().received.len(), 1);
        assert_eq!(session.sink().received[0].data.as_ref(), &[0xAA]);
    }

    #[test]
    fn test_取回下游() {
        let mut session = StreamSession::new(Box::new(EchoReframer::new()), CollectSink::new());
        session.push(Packet::from_data(vec![0x01u8])).unwrap();
        let sink = session.into_sink();
        assert_eq!(sink.received.len(), 2);
    }
}
