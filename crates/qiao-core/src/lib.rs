//! # qiao-core
//!
//! Qiao 码流重组框架核心库, 提供基础类型定义和错误处理.
//!
//! 本 crate 为整个 Qiao 框架提供底层基础设施, 时间戳与有理数语义
//! 与 FFmpeg 的 time_base 体系保持一致.

pub mod error;
pub mod media_type;
pub mod rational;
pub mod timestamp;

// 重导出常用类型
pub use error::{QiaoError, QiaoResult};
pub use media_type::MediaType;
pub use rational::Rational;
pub use timestamp::Timestamp;
