//! # Qiao (桥)
//!
//! 纯 Rust 实现的码流重组适配层, 面向 OpenMAX IL 风格的解码组件.
//!
//! 容器解封装产出的码流往往不能直接送入解码组件: 配置记录整段挂在
//! 协商信息上, 访问单元里混着多个 NAL 单元, 音频配置缺少独立的下发
//! 通道. Qiao 按每种码流的投递约定重切缓冲:
//!
//! - **H.264/AVC**: 配置记录展开为逐参数集缓冲, 访问单元按 NAL 单元切分
//! - **MPEG-4 Part 2**: 配置记录作为独立首缓冲先行投递
//! - **AAC**: 配置字节并入首帧
//! - **G.729**: 直通
//!
//! # 快速开始
//!
//! ```rust
//! use qiao::reframe::{CodecId, CollectSink, Packet, StreamSession};
//!
//! let registry = qiao::default_reframe_registry();
//! let reframer = registry.create_reframer(CodecId::H264).unwrap();
//! let mut session = StreamSession::new(reframer, CollectSink::new());
//!
//! // 访问单元: 两个带 4 字节长度前缀的 NAL 单元
//! let au = Packet::from_data(vec![
//!     0x00u8, 0x00, 0x00, 0x02, 0x09, 0xF0, // AUD
//!     0x00, 0x00, 0x00, 0x03, 0x65, 0x88, 0x84, // IDR 切片
//! ]);
//! session.push(au).unwrap();
//! assert_eq!(session.sink().received.len(), 2);
//! ```
//!
//! # Crate 结构
//!
//! | Crate | 功能 |
//! |-------|------|
//! | `qiao-core` | 核心类型与工具 |
//! | `qiao-reframe` | 码流重组层 |

/// 核心类型与工具
pub use qiao_core as core;

/// 码流重组层
pub use qiao_reframe as reframe;

/// 获取 Qiao 版本号
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// 创建已注册所有内置重组器的注册表
pub fn default_reframe_registry() -> qiao_reframe::ReframerRegistry {
    let mut registry = qiao_reframe::ReframerRegistry::new();
    qiao_reframe::register_all(&mut registry);
    registry
}
