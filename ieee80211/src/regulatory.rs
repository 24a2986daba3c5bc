//! 监管规则表
//!
//! 对应 Linux include/net/regulatory.h 与 net/wireless/reg.c 中驱动侧用到的部分：
//! ieee80211_reg_rule / ieee80211_regdomain 与 freq_reg_info 的频率到规则查找。

/// 规则标志位（对应 NL80211_RRF_*）
pub mod reg_rule_flags {
    /// 禁 OFDM
    pub const NO_OFDM: u32 = 1 << 0;
    /// 禁 CCK
    pub const NO_CCK: u32 = 1 << 1;
    /// 禁室内
    pub const NO_INDOOR: u32 = 1 << 2;
    /// 禁室外
    pub const NO_OUTDOOR: u32 = 1 << 3;
    /// 需 DFS
    pub const DFS: u32 = 1 << 4;
    /// 仅被动扫描
    pub const PASSIVE_SCAN: u32 = 1 << 7;
    /// 禁止 IBSS
    pub const NO_IBSS: u32 = 1 << 8;
}

/// 频率区间，kHz（对应 struct ieee80211_freq_range）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreqRange {
    pub start_freq_khz: u32,
    pub end_freq_khz: u32,
    pub max_bandwidth_khz: u32,
}

/// 功率限制（对应 struct ieee80211_power_rule）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerRule {
    /// 最大天线增益 mBi（100 * dBi）
    pub max_antenna_gain_mbi: i32,
    /// 最大 EIRP mBm（100 * dBm）
    pub max_eirp_mbm: i32,
}

/// 监管规则（对应 struct ieee80211_reg_rule）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegRule {
    pub freq_range: FreqRange,
    pub power_rule: PowerRule,
    /// NL80211_RRF_* 标志
    pub flags: u32,
}

impl RegRule {
    /// 对应 REG_RULE(freq start, freq end, bandwidth, max gain, eirp, reg_flags) 宏：
    /// 入参按 MHz / dBi / dBm，内部换算为 kHz / mBi / mBm。
    pub const fn new(
        start_mhz: u32,
        end_mhz: u32,
        bw_mhz: u32,
        gain_dbi: i32,
        eirp_dbm: i32,
        flags: u32,
    ) -> Self {
        Self {
            freq_range: FreqRange {
                start_freq_khz: start_mhz * 1000,
                end_freq_khz: end_mhz * 1000,
                max_bandwidth_khz: bw_mhz * 1000,
            },
            power_rule: PowerRule {
                max_antenna_gain_mbi: gain_dbi * 100,
                max_eirp_mbm: eirp_dbm * 100,
            },
            flags,
        }
    }
}

/// 监管域（对应 struct ieee80211_regdomain）
#[derive(Debug, Clone, Copy)]
pub struct Regdomain {
    /// ISO 3166 国家码；自定义世界域用 "03" 等占位码
    pub alpha2: [u8; 2],
    pub rules: &'static [RegRule],
}

/// 20MHz 信道半宽，kHz；规则须覆盖整个信道宽度才算命中
const HALF_CHANNEL_KHZ: u32 = 10_000;

impl Regdomain {
    /// 按中心频率查规则（对应 freq_reg_info）
    ///
    /// 规则须完整覆盖 20MHz 信道（start ≤ cf−10MHz 且 cf+10MHz ≤ end）；
    /// 多条规则重叠时取表中先出现者。无规则覆盖返回 None（对应 ERR_PTR 路径）。
    pub fn freq_reg_info(&self, center_freq_mhz: u32) -> Option<&RegRule> {
        let freq_khz = center_freq_mhz * 1000;
        self.rules.iter().find(|rule| {
            let range = &rule.freq_range;
            freq_khz >= range.start_freq_khz + HALF_CHANNEL_KHZ
                && freq_khz + HALF_CHANNEL_KHZ <= range.end_freq_khz
        })
    }
}
