//! 媒体缓冲 (Packet).
//!
//! 流经重组层的一段压缩码流数据. 协商阶段的编解码配置记录、上游送入的
//! 访问单元、重组后投递给下游的逐单元缓冲, 均用本类型表示.

use bitflags::bitflags;
use bytes::Bytes;
use qiao_core::{Rational, Timestamp};

bitflags! {
    /// 缓冲标志位
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BufferFlags: u32 {
        /// 关键帧 (随机访问点)
        const KEYFRAME = 1 << 0;
        /// 头部数据 (参数集、编解码配置等非采样数据)
        const HEADER   = 1 << 1;
    }
}

/// 媒体缓冲
///
/// 一段压缩码流数据及其投递所需的元信息.
/// 载荷使用 `Bytes`, 重组产生的子缓冲通过零拷贝切片与源缓冲共享底层存储,
/// 各缓冲可独立释放.
#[derive(Debug, Clone)]
pub struct Packet {
    /// 码流数据
    pub data: Bytes,
    /// 呈现时间戳, `NOPTS_VALUE` 表示未定义
    pub pts: i64,
    /// 时间基
    pub time_base: Rational,
    /// 缓冲标志
    pub flags: BufferFlags,
}

impl Packet {
    /// 创建空缓冲
    pub fn empty() -> Self {
        Self {
            data: Bytes::new(),
            pts: qiao_core::timestamp::NOPTS_VALUE,
            time_base: Rational::UNDEFINED,
            flags: BufferFlags::empty(),
        }
    }

    /// 从数据创建缓冲
    pub fn from_data(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            ..Self::empty()
        }
    }

    /// 设置时间戳, 链式调用
    pub fn with_pts(mut self, pts: i64, time_base: Rational) -> Self {
        self.pts = pts;
        self.time_base = time_base;
        self
    }

    /// 设置标志位, 链式调用
    pub fn with_flags(mut self, flags: BufferFlags) -> Self {
        self.flags = flags;
        self
    }

    /// 数据大小 (字节)
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// 是否为空缓冲
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 以 `Timestamp` 形式取出时间戳, 便于日志展示
    pub fn timestamp(&self) -> Timestamp {
        Timestamp::new(self.pts, self.time_base)
    }

    /// 从另一个缓冲复制元信息 (时间戳、时间基、标志位), 数据不变
    pub fn copy_metadata_from(&mut self, other: &Packet) {
        self.pts = other.pts;
        self.time_base = other.time_base;
        self.flags = other.flags;
    }
}
