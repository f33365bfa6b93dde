//! H.264 (AVC) 码流重组器.
//!
//! 处理 AVCC (length-prefixed) 封装的 H.264 码流:
//!
//! - 配置阶段: 解析 AVCDecoderConfigurationRecord, 把其中的 SPS/PPS
//!   参数集逐个展开为带 4 字节长度前缀的独立缓冲, 先于载荷投递
//! - 变换阶段: 把访问单元按 NAL 长度前缀切分, 每个 NAL 单元连同
//!   其原始 4 字节前缀切出一个独立缓冲
//!
//! 此类重组针对只按 "每缓冲一个完整 NAL 单元" 约定消费码流的解码
//! 组件: 它们既不接受整段 codec_data, 也不接受多 NAL 的访问单元.
//!
//! # AVCDecoderConfigurationRecord 布局
//! ```text
//! [version(1)] [profile(1)] [compat(1)] [level(1)] [lengthSizeMinusOne(1)]
//! [numOfSequenceParameterSets(1), 低 5 位有效]
//!   重复: [sps_len: 2 bytes BE] [sps_data]
//! [numOfPictureParameterSets(1), 整字节]
//!   重复: [pps_len: 2 bytes BE] [pps_data]
//! [可选扩展字节...]
//! ```

use bytes::BytesMut;
use log::debug;
use qiao_core::{QiaoError, QiaoResult};

use crate::buffer::{BufferFlags, Packet};
use crate::codec_id::CodecId;
use crate::reframer::Reframer;

/// 配置记录固定头部长度 (含 SPS 计数字节)
const CONFIG_HEADER_LEN: usize = 6;

/// NAL 单元长度前缀宽度 (字节)
const NAL_LENGTH_LEN: usize = 4;

/// SPS 计数字段的有效位掩码, 高 3 位为保留位
const SPS_COUNT_MASK: u8 = 0x1f;

/// 解析 AVC 配置记录, 展开为参数集缓冲序列
///
/// 依次提取记录中的所有 SPS 与 PPS, 每个参数集生成一个
/// `[BE32 长度][参数集数据]` 形式的缓冲并置 `HEADER` 标志,
/// 输出顺序为先全部 SPS, 后全部 PPS.
///
/// 时间戳规则: 每个 PPS 缓冲继承配置记录自身的时间戳,
/// SPS 缓冲不带时间戳.
///
/// SPS 计数只取低 5 位, PPS 计数取整字节, 两者的不对称来自 avcC
/// 字段布局. 最后一个 PPS 之后允许存在扩展字节 (High Profile 的
/// chroma_format 等), 解析时忽略.
///
/// # 返回
/// 失败时不产出任何缓冲:
/// - `MalformedRecord`: 记录不足 6 字节
/// - `TruncatedRecord`: 计数、长度字段或参数集数据越过记录末尾
pub fn parse_configuration(record: &Packet) -> QiaoResult<Vec<Packet>> {
    let data: &[u8] = &record.data;
    if data.len() < CONFIG_HEADER_LEN {
        return Err(QiaoError::MalformedRecord {
            len: data.len(),
            min: CONFIG_HEADER_LEN,
        });
    }

    let mut out = Vec::new();
    let num_sps = (data[5] & SPS_COUNT_MASK) as usize;
    let mut pos = CONFIG_HEADER_LEN;

    for _ in 0..num_sps {
        let sps = read_parameter_set(data, &mut pos, "SPS")?;
        out.push(sps);
    }

    // PPS 计数是完整一个字节, 不做掩码
    if pos >= data.len() {
        return Err(QiaoError::TruncatedRecord {
            section: "PPS 计数",
            offset: pos,
            needed: 1,
            remaining: 0,
        });
    }
    let num_pps = data[pos] as usize;
    pos += 1;

    for _ in 0..num_pps {
        let mut pps = read_parameter_set(data, &mut pos, "PPS")?;
        // 每个 PPS 缓冲继承配置记录的时间戳
        pps.pts = record.pts;
        pps.time_base = record.time_base;
        out.push(pps);
    }

    debug!(
        "h264 配置记录展开完成: sps={}, pps={}, 消费 {}/{} 字节",
        num_sps,
        num_pps,
        pos,
        data.len()
    );
    Ok(out)
}

/// 从记录 `pos` 处读取一个参数集 (2 字节 BE 长度 + 数据),
/// 组装为带 4 字节长度前缀的独立缓冲
fn read_parameter_set(data: &[u8], pos: &mut usize, section: &'static str) -> QiaoResult<Packet> {
    let start = *pos;
    if start + 2 > data.len() {
        return Err(QiaoError::TruncatedRecord {
            section,
            offset: start,
            needed: 2,
            remaining: data.len() - start,
        });
    }
    let len = ((data[start] as usize) << 8) | data[start + 1] as usize;
    let body = start + 2;
    if body + len > data.len() {
        return Err(QiaoError::TruncatedRecord {
            section,
            offset: body,
            needed: len,
            remaining: data.len() - body,
        });
    }

    let mut buf = BytesMut::with_capacity(NAL_LENGTH_LEN + len);
    buf.extend_from_slice(&(len as u32).to_be_bytes());
    buf.extend_from_slice(&data[body..body + len]);
    *pos = body + len;

    debug!("h264 提取 {}: offset={:#x}, len={:#x}", section, start, len);

    Ok(Packet::from_data(buf.freeze()).with_flags(BufferFlags::HEADER))
}

/// 把 AVCC 访问单元切分为逐 NAL 单元的缓冲序列
///
/// 访问单元是 `[BE32 长度][NAL 数据]` 的重复序列. 每个 NAL 单元
/// 连同其原始 4 字节长度前缀零拷贝切出一个缓冲, 前缀按原样保留.
/// 每个输出缓冲都复制源缓冲的时间戳.
///
/// 成功时访问单元被完整消费: 所有输出缓冲的字节拼接即还原输入.
/// 空输入返回空序列.
///
/// # 返回
/// 失败时不产出任何缓冲:
/// - `TruncatedAccessUnit`: 长度前缀或 NAL 数据越过访问单元末尾
/// - `MalformedNalLength`: 长度字段为 0
pub fn split_access_unit(packet: &Packet) -> QiaoResult<Vec<Packet>> {
    let data = &packet.data;
    let mut out = Vec::new();
    let mut pos = 0usize;

    while pos < data.len() {
        if pos + NAL_LENGTH_LEN > data.len() {
            return Err(QiaoError::TruncatedAccessUnit {
                offset: pos,
                needed: NAL_LENGTH_LEN,
                remaining: data.len() - pos,
            });
        }
        let nal_len = ((data[pos] as usize) << 24)
            | ((data[pos + 1] as usize) << 16)
            | ((data[pos + 2] as usize) << 8)
            | data[pos + 3] as usize;
        if nal_len == 0 {
            return Err(QiaoError::MalformedNalLength { offset: pos });
        }
        let total = NAL_LENGTH_LEN + nal_len;
        if pos + total > data.len() {
            return Err(QiaoError::TruncatedAccessUnit {
                offset: pos,
                needed: total,
                remaining: data.len() - pos,
            });
        }

        debug!("h264 切分 NAL 单元: offset={:#x}, len={:#x}", pos, nal_len);

        // 连同原始长度前缀零拷贝切出
        let nal = data.slice(pos..pos + total);
        out.push(Packet::from_data(nal).with_pts(packet.pts, packet.time_base));
        pos += total;
    }

    Ok(out)
}

/// H.264 重组器
///
/// 无状态: 两个阶段分别委托给 [`parse_configuration`] 和
/// [`split_access_unit`].
pub struct H264Reframer;

impl H264Reframer {
    /// 注册表工厂函数
    pub fn create() -> QiaoResult<Box<dyn Reframer>> {
        Ok(Box::new(Self))
    }
}

impl Reframer for H264Reframer {
    fn codec_id(&self) -> CodecId {
        CodecId::H264
    }

    fn name(&self) -> &str {
        CodecId::H264.name()
    }

    fn reframe_config(&mut self, codec_data: Packet) -> QiaoResult<Vec<Packet>> {
        parse_configuration(&codec_data)
    }

    fn reframe_payload(&mut self, packet: Packet) -> QiaoResult<Vec<Packet>> {
        split_access_unit(&packet)
    }
}
