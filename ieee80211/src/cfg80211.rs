//! cfg80211 抽象
//!
//! 对应 Linux net/cfg80211.h 中监管域路径用到的部分：wiphy、supported_band、
//! regulatory_request 与 wiphy_apply_custom_regulatory。
//! 参考 rtw 驱动 os_dep/linux/ 对 wiphy->bands / reg_notifier 的用法。

extern crate alloc;

use alloc::vec::Vec;

use crate::ieee80211::{channel_flags, channel_to_frequency, Band, Channel, NUM_BANDS};
use crate::regulatory::{reg_rule_flags, Regdomain};

/// wiphy 监管标志位（对应 enum ieee80211_regulatory_flags REGULATORY_*）
pub mod regulatory_flags {
    /// 驱动自带监管域（wiphy_apply_custom_regulatory）
    pub const CUSTOM_REG: u32 = 1 << 0;
    /// 严格模式：country IE 前不接受 hint
    pub const STRICT_REG: u32 = 1 << 1;
    /// 忽略 beacon hint 放开
    pub const DISABLE_BEACON_HINTS: u32 = 1 << 2;
}

/// 监管事件发起方（对应 enum nl80211_reg_initiator）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RegInitiator {
    Core = 0,
    User = 1,
    Driver = 2,
    CountryIe = 3,
}

/// 监管事件请求（对应 struct regulatory_request 中通知回调用到的字段）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegulatoryRequest {
    pub initiator: RegInitiator,
    pub alpha2: [u8; 2],
}

impl RegulatoryRequest {
    pub const fn new(initiator: RegInitiator, alpha2: [u8; 2]) -> Self {
        Self { initiator, alpha2 }
    }
}

/// 监管事件通知回调（对应 wiphy->reg_notifier）
pub type RegNotifier = fn(&mut Wiphy, &RegulatoryRequest);

/// 支持的频段（对应 struct ieee80211_supported_band）
///
/// 信道表运行期可写：监管域会改写各信道的 flags / max_power。
#[derive(Debug, Clone)]
pub struct SupportedBand {
    pub band: Band,
    pub channels: Vec<Channel>,
}

/// 2.4G 默认功率 dBm
const DEFAULT_MAX_POWER_DBM: i8 = 20;

/// 5G UNII 信道号表（对应 rtw_5ghz_a_channels 的信道号列）
const CHAN_5GHZ: [u8; 24] = [
    36, 40, 44, 48, 52, 56, 60, 64, 100, 104, 108, 112, 116, 120, 124, 128, 132, 136, 140, 149,
    153, 157, 161, 165,
];

impl SupportedBand {
    /// 2.4G 频段信道表，信道 1..=14（对应 rtw_2ghz_channels）
    pub fn band_2ghz() -> Self {
        let mut channels = Vec::with_capacity(14);
        for ch in 1..=14u8 {
            if let Some(freq) = channel_to_frequency(ch, Band::TwoGhz) {
                channels.push(Channel::new_2g(freq, ch, DEFAULT_MAX_POWER_DBM));
            }
        }
        Self {
            band: Band::TwoGhz,
            channels,
        }
    }

    /// 5G 频段信道表（对应 rtw_5ghz_a_channels）；5G 中心频率 = 5000 + ch*5
    pub fn band_5ghz() -> Self {
        let mut channels = Vec::with_capacity(CHAN_5GHZ.len());
        for &ch in CHAN_5GHZ.iter() {
            channels.push(Channel::new_5g(5000 + ch as u32 * 5, ch, DEFAULT_MAX_POWER_DBM));
        }
        Self {
            band: Band::FiveGhz,
            channels,
        }
    }
}

/// 无线物理设备（对应 struct wiphy 中监管域路径用到的字段）
pub struct Wiphy {
    /// 各频段信道表，下标为 Band（对应 wiphy->bands[NUM_NL80211_BANDS]）
    pub bands: [Option<SupportedBand>; NUM_BANDS],
    /// REGULATORY_* 标志（对应 wiphy->regulatory_flags）
    pub regulatory_flags: u32,
    /// 已应用的自定义监管域（wiphy_apply_custom_regulatory 写入）
    regd: Option<&'static Regdomain>,
    /// 监管事件通知回调（对应 wiphy->reg_notifier）
    reg_notifier: Option<RegNotifier>,
}

impl Wiphy {
    pub const fn new() -> Self {
        Self {
            bands: [None, None, None],
            regulatory_flags: 0,
            regd: None,
            reg_notifier: None,
        }
    }

    pub fn set_reg_notifier(&mut self, notifier: RegNotifier) {
        self.reg_notifier = Some(notifier);
    }

    /// 已应用的自定义监管域
    #[inline]
    pub fn regd(&self) -> Option<&'static Regdomain> {
        self.regd
    }

    #[inline]
    pub fn band(&self, band: Band) -> Option<&SupportedBand> {
        self.bands[band as usize].as_ref()
    }

    #[inline]
    pub fn band_mut(&mut self, band: Band) -> Option<&mut SupportedBand> {
        self.bands[band as usize].as_mut()
    }

    /// 按中心频率查信道（对应 ieee80211_get_channel）
    pub fn channel(&self, center_freq: u32) -> Option<&Channel> {
        self.bands
            .iter()
            .flatten()
            .flat_map(|band| band.channels.iter())
            .find(|ch| ch.center_freq == center_freq)
    }

    pub fn channel_mut(&mut self, center_freq: u32) -> Option<&mut Channel> {
        self.bands
            .iter_mut()
            .flatten()
            .flat_map(|band| band.channels.iter_mut())
            .find(|ch| ch.center_freq == center_freq)
    }

    /// 按中心频率查当前监管域规则（对应 freq_reg_info(wiphy, freq)）
    pub fn freq_reg_info(&self, center_freq_mhz: u32) -> Option<&'static crate::regulatory::RegRule> {
        self.regd.and_then(|rd| rd.freq_reg_info(center_freq_mhz))
    }

    /// 应用自定义监管域（对应 wiphy_apply_custom_regulatory）
    ///
    /// 逐信道查规则：无规则覆盖的信道置 DISABLED；有规则的信道按规则标志
    /// 重写 flags（PASSIVE_SCAN / NO_IBSS / NO_OFDM / DFS→RADAR），
    /// 并按 EIRP 设置 max_power。只改 flags 与 max_power，不动信道号/频率。
    pub fn apply_custom_regulatory(&mut self, regd: &'static Regdomain) {
        for band in self.bands.iter_mut().flatten() {
            for ch in band.channels.iter_mut() {
                match regd.freq_reg_info(ch.center_freq) {
                    None => ch.flags |= channel_flags::DISABLED,
                    Some(rule) => {
                        let mut flags = 0u32;
                        if rule.flags & reg_rule_flags::PASSIVE_SCAN != 0 {
                            flags |= channel_flags::PASSIVE_SCAN;
                        }
                        if rule.flags & reg_rule_flags::NO_IBSS != 0 {
                            flags |= channel_flags::NO_IBSS;
                        }
                        if rule.flags & reg_rule_flags::NO_OFDM != 0 {
                            flags |= channel_flags::NO_OFDM;
                        }
                        if rule.flags & reg_rule_flags::DFS != 0 {
                            flags |= channel_flags::RADAR;
                        }
                        ch.flags = flags;
                        ch.max_power = (rule.power_rule.max_eirp_mbm / 100) as i8;
                    }
                }
            }
        }
        self.regd = Some(regd);
    }

    /// 触发监管事件通知（host 侧在监管事件后调用 wiphy->reg_notifier）
    pub fn notify(&mut self, request: &RegulatoryRequest) {
        if let Some(notifier) = self.reg_notifier {
            notifier(self, request);
        }
    }
}

impl Default for Wiphy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regulatory::RegRule;
    use core::sync::atomic::{AtomicUsize, Ordering};

    static WORLD_RD: Regdomain = Regdomain {
        alpha2: *b"03",
        rules: &[RegRule::new(2400, 2494, 40, 0, 25, 0)],
    };

    static PASSIVE_RD: Regdomain = Regdomain {
        alpha2: *b"03",
        rules: &[RegRule::new(
            2400,
            2494,
            40,
            0,
            25,
            reg_rule_flags::PASSIVE_SCAN | reg_rule_flags::NO_IBSS,
        )],
    };

    fn wiphy_2g_5g() -> Wiphy {
        let mut wiphy = Wiphy::new();
        wiphy.bands[Band::TwoGhz as usize] = Some(SupportedBand::band_2ghz());
        wiphy.bands[Band::FiveGhz as usize] = Some(SupportedBand::band_5ghz());
        wiphy
    }

    #[test]
    fn band_2ghz_table() {
        let band = SupportedBand::band_2ghz();
        assert_eq!(band.channels.len(), 14);
        assert_eq!(band.channels[0].center_freq, 2412);
        assert_eq!(band.channels[0].hw_value, 1);
        assert_eq!(band.channels[13].center_freq, 2484);
        assert_eq!(band.channels[13].hw_value, 14);
    }

    #[test]
    fn channel_lookup_by_freq() {
        let wiphy = wiphy_2g_5g();
        assert_eq!(wiphy.channel(2437).map(|ch| ch.hw_value), Some(6));
        assert_eq!(wiphy.channel(5260).map(|ch| ch.hw_value), Some(52));
        assert!(wiphy.channel(2455).is_none());
    }

    #[test]
    fn custom_regulatory_disables_uncovered() {
        let mut wiphy = wiphy_2g_5g();
        wiphy.apply_custom_regulatory(&WORLD_RD);
        // 2.4G 全部放行，5G 无规则覆盖全部禁用
        for ch in &wiphy.band(Band::TwoGhz).unwrap().channels {
            assert_eq!(ch.flags, 0);
            assert_eq!(ch.max_power, 25);
        }
        for ch in &wiphy.band(Band::FiveGhz).unwrap().channels {
            assert_ne!(ch.flags & channel_flags::DISABLED, 0);
        }
        assert!(wiphy.regd().is_some());
        assert!(wiphy.freq_reg_info(2412).is_some());
        assert!(wiphy.freq_reg_info(5180).is_none());
    }

    #[test]
    fn custom_regulatory_maps_rule_flags() {
        let mut wiphy = wiphy_2g_5g();
        wiphy.apply_custom_regulatory(&PASSIVE_RD);
        let ch = wiphy.channel(2412).unwrap();
        assert_ne!(ch.flags & channel_flags::PASSIVE_SCAN, 0);
        assert_ne!(ch.flags & channel_flags::NO_IBSS, 0);
        assert_eq!(ch.flags & channel_flags::DISABLED, 0);
    }

    static NOTIFY_COUNT: AtomicUsize = AtomicUsize::new(0);

    fn count_notifier(_wiphy: &mut Wiphy, request: &RegulatoryRequest) {
        assert_eq!(request.initiator, RegInitiator::Driver);
        NOTIFY_COUNT.fetch_add(1, Ordering::SeqCst);
    }

    #[test]
    fn notify_fires_registered_callback() {
        let mut wiphy = Wiphy::new();
        // 未注册回调时静默
        wiphy.notify(&RegulatoryRequest::new(RegInitiator::Driver, *b"03"));
        assert_eq!(NOTIFY_COUNT.load(Ordering::SeqCst), 0);

        wiphy.set_reg_notifier(count_notifier);
        wiphy.notify(&RegulatoryRequest::new(RegInitiator::Driver, *b"03"));
        assert_eq!(NOTIFY_COUNT.load(Ordering::SeqCst), 1);
    }
}
