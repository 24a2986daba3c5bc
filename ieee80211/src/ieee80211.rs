//! IEEE 802.11 信道类型与常量
//!
//! 对应 Linux include/linux/ieee80211.h 中 rtw 监管域用到的部分：
//! 频段、信道（含监管标志位）、信道号与中心频率互换。

/// 频段（对应 NL80211_BAND_*）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Band {
    #[default]
    TwoGhz = 0,
    FiveGhz = 1,
    SixGhz = 2,
}

/// 频段数（对应 NUM_NL80211_BANDS）
pub const NUM_BANDS: usize = 3;

/// 信道标志位（对应 IEEE80211_CHAN_*，由监管域写入）
pub mod channel_flags {
    /// 信道禁用
    pub const DISABLED: u32 = 1 << 0;
    /// 仅被动扫描（不得主动发探测帧）
    pub const PASSIVE_SCAN: u32 = 1 << 1;
    /// 禁止 IBSS/beacon
    pub const NO_IBSS: u32 = 1 << 2;
    /// 需雷达检测（DFS）
    pub const RADAR: u32 = 1 << 3;
    /// 禁 OFDM（仅 11b）
    pub const NO_OFDM: u32 = 1 << 6;
}

/// 信道（对应 struct ieee80211_channel）
///
/// `flags` 由监管域逻辑改写；`beacon_found` 由扫描路径置位，
/// 监管域据此放开 beacon/IBSS 限制。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Channel {
    /// 中心频率 MHz
    pub center_freq: u32,
    /// 频段
    pub band: Band,
    /// 信道号（对应 hw_value）
    pub hw_value: u8,
    /// IEEE80211_CHAN_* 标志
    pub flags: u32,
    /// 最大发射功率 dBm
    pub max_power: i8,
    /// 该信道上是否收到过 beacon
    pub beacon_found: bool,
}

impl Channel {
    pub const fn new_2g(freq_mhz: u32, hw_value: u8, max_power_dbm: i8) -> Self {
        Self {
            center_freq: freq_mhz,
            band: Band::TwoGhz,
            hw_value,
            flags: 0,
            max_power: max_power_dbm,
            beacon_found: false,
        }
    }

    pub const fn new_5g(freq_mhz: u32, hw_value: u8, max_power_dbm: i8) -> Self {
        Self {
            center_freq: freq_mhz,
            band: Band::FiveGhz,
            hw_value,
            flags: 0,
            max_power: max_power_dbm,
            beacon_found: false,
        }
    }
}

/// 信道号转中心频率 MHz（对应 ieee80211_channel_to_frequency 的 2.4G 子集）
///
/// 见 802.11 17.3.8.3.2 与 Annex J；2.4G 与 5G 信道号有重叠，须带频段查询。
/// 仅支持 2.4G：信道 14 为 2484，1..=13 为 2407 + ch*5，其余返回 None。
pub fn channel_to_frequency(chan: u8, band: Band) -> Option<u32> {
    if band != Band::TwoGhz {
        return None;
    }
    match chan {
        14 => Some(2484),
        1..=13 => Some(2407 + chan as u32 * 5),
        _ => None,
    }
}

/// 中心频率 MHz 转信道号（反向，诊断用）
pub fn frequency_to_channel(freq_mhz: u32) -> Option<u8> {
    if freq_mhz == 2484 {
        return Some(14);
    }
    if (2412..=2472).contains(&freq_mhz) && (freq_mhz - 2407) % 5 == 0 {
        return Some(((freq_mhz - 2407) / 5) as u8);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chan_to_freq_2g() {
        assert_eq!(channel_to_frequency(1, Band::TwoGhz), Some(2412));
        assert_eq!(channel_to_frequency(6, Band::TwoGhz), Some(2437));
        assert_eq!(channel_to_frequency(13, Band::TwoGhz), Some(2472));
        assert_eq!(channel_to_frequency(14, Band::TwoGhz), Some(2484));
    }

    #[test]
    fn chan_to_freq_unsupported() {
        assert_eq!(channel_to_frequency(0, Band::TwoGhz), None);
        assert_eq!(channel_to_frequency(15, Band::TwoGhz), None);
        assert_eq!(channel_to_frequency(36, Band::FiveGhz), None);
    }

    #[test]
    fn freq_to_chan_roundtrip() {
        for ch in 1..=14u8 {
            let freq = channel_to_frequency(ch, Band::TwoGhz).unwrap();
            assert_eq!(frequency_to_channel(freq), Some(ch));
        }
        assert_eq!(frequency_to_channel(2455), None);
        assert_eq!(frequency_to_channel(5180), None);
    }
}
