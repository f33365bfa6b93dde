//! 下游投递接口.
//!
//! 重组层不关心缓冲最终去向, 只把重组结果逐个交给 `BufferSink`.
//! 投递结果用 `DeliveryStatus` 表示, 对重组层而言仅作记录, 不改变控制流.

use crate::buffer::Packet;
use std::fmt;

/// 下游投递状态
///
/// 与常见媒体管线的 flow return 语义对应. 除 `Ok` 外均为非成功状态,
/// 由调用方决定如何处置, 重组层只负责记录.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// 投递成功
    Ok,
    /// 下游未连接
    NotLinked,
    /// 下游正在冲洗, 数据被丢弃
    Flushing,
    /// 下游已到达流末尾
    Eos,
    /// 下游未完成协商
    NotNegotiated,
    /// 下游错误
    Error,
}

impl DeliveryStatus {
    /// 获取状态的人类可读名称
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::NotLinked => "not-linked",
            Self::Flushing => "flushing",
            Self::Eos => "eos",
            Self::NotNegotiated => "not-negotiated",
            Self::Error => "error",
        }
    }

    /// 是否为成功状态
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 下游接收端 trait
///
/// 接收一个重组后的缓冲 (数据 + 时间戳), 返回投递状态.
/// 闭包 `FnMut(Packet) -> DeliveryStatus` 自动实现本 trait,
/// 因此纯函数式的下游组合无需定义新类型.
pub trait BufferSink {
    /// 接收一个缓冲
    fn deliver(&mut self, packet: Packet) -> DeliveryStatus;
}

impl<F> BufferSink for F
where
    F: FnMut(Packet) -> DeliveryStatus,
{
    fn deliver(&mut self, packet: Packet) -> DeliveryStatus {
        self(packet)
    }
}

/// 收集型下游
///
/// 缓存收到的所有缓冲并始终返回成功, 用于测试和结果检视.
#[derive(Debug, Default)]
pub struct CollectSink {
    /// 按投递顺序保存的缓冲
    pub received: Vec<Packet>,
}

impl CollectSink {
    /// 创建空的收集型下游
    pub fn new() -> Self {
        Self::default()
    }
}

impl BufferSink for CollectSink {
    fn deliver(&mut self, packet: Packet) -> DeliveryStatus {
        self.received.push(packet);
        DeliveryStatus::Ok
    }
}
