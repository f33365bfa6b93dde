//! # qiao-reframe
//!
//! Qiao 码流重组层, 在容器解封装与解码组件之间完成缓冲形态的适配.
//!
//! OpenMAX IL 一类的解码组件对进入端口的缓冲形态有严格约定:
//! 参数集须逐个独立投递、访问单元须按 NAL 单元切分、配置字节须并入
//! 首帧等. 本 crate 把这些适配规则抽象为两阶段的 [`Reframer`] 接口,
//! 并用 [`StreamSession`] 将协商状态、重组器与下游组合为一路完整的
//! 投递流水线.
//!
//! ## 支持的码流
//!
//! - **H.264/AVC**: 配置记录展开为参数集缓冲 + 访问单元逐 NAL 切分
//! - **MPEG-4 Part 2**: 配置记录作为独立首缓冲投递
//! - **AAC**: 配置字节并入首帧
//! - **G.729**: 直通
//!
//! ## 使用示例
//!
//! ```rust
//! use qiao_reframe::{CodecId, CollectSink, Packet, ReframerRegistry, StreamSession};
//!
//! let mut reg = ReframerRegistry::new();
//! qiao_reframe::register_all(&mut reg);
//!
//! let reframer = reg.create_reframer(CodecId::G729).unwrap();
//! let mut session = StreamSession::new(reframer, CollectSink::new());
//! session.push(Packet::from_data(vec![0x10u8, 0x20])).unwrap();
//! assert_eq!(session.sink().received.len(), 1);
//! ```

pub mod buffer;
pub mod codec_id;
pub mod reframer;
pub mod reframers;
pub mod registry;
pub mod session;
pub mod sink;

// 重导出常用类型
pub use buffer::{BufferFlags, Packet};
pub use codec_id::CodecId;
pub use reframer::Reframer;
pub use registry::{ReframerFactory, ReframerRegistry};
pub use session::StreamSession;
pub use sink::{BufferSink, CollectSink, DeliveryStatus};

/// 注册所有内置重组器
pub fn register_all(registry: &mut ReframerRegistry) {
    reframers::register_all_reframers(registry);
}
