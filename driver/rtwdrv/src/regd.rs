//! 监管域（channel legality）管理
//!
//! 对应 rtw 驱动 os_dep/linux/wifi_regd.c：持有硬编码世界监管域，
//! 在监管事件回调里把每信道标志（禁用/仅被动/雷达）写回 wiphy 信道表。
//! 规则引擎、频率到规则查找、country IE 解析均在 host 侧（ieee80211 crate）。

use ieee80211::{
    channel_flags, channel_to_frequency, reg_rule_flags, regulatory_flags, Band, RegInitiator,
    RegRule, Regdomain, RegulatoryRequest, Wiphy,
};

use spin::Mutex;

use crate::channel_plan::{ChannelPlan, ScanType};

/// 2G 信道 01-11：所有世界监管域均允许主动扫描
pub const RTW_2GHZ_CH01_11: RegRule = RegRule::new(2410 - 10, 2484 + 10, 40, 0, 25, 0);

/// 2G 信道 12-13：仅被动扫描，按监管域逐个放开主动扫描
pub const RTW_2GHZ_CH12_13: RegRule = RegRule::new(
    2467 - 10,
    2472 + 10,
    40,
    0,
    25,
    reg_rule_flags::PASSIVE_SCAN,
);

/// 2G 信道 14：仅被动扫描且禁 OFDM（仅 11b）
pub const RTW_2GHZ_CH14: RegRule = RegRule::new(
    2484 - 10,
    2484 + 10,
    40,
    0,
    25,
    reg_rule_flags::PASSIVE_SCAN | reg_rule_flags::NO_OFDM,
);

/// 硬编码世界监管域（对应 rtw_regdom_rd）
static RTW_REGDOM_RD: Regdomain = Regdomain {
    alpha2: *b"03",
    rules: &[RTW_2GHZ_CH01_11],
};

/// 驱动监管状态（对应 struct rtw_regulatory + mlme_ext_priv 的信道集）
///
/// 通知回调是注册在 wiphy 上的普通函数，需经模块级状态取回驱动侧信道集
/// （对应 C 侧 wiphy_to_adapter(wiphy)->mlmeextpriv 的取法）。
pub struct RtwRegulatory {
    alpha2: [u8; 2],
    channel_plan: ChannelPlan,
}

impl RtwRegulatory {
    pub fn new(channel_plan: ChannelPlan) -> Self {
        Self {
            alpha2: RTW_REGDOM_RD.alpha2,
            channel_plan,
        }
    }

    #[inline]
    pub fn alpha2(&self) -> [u8; 2] {
        self.alpha2
    }

    #[inline]
    pub fn channel_plan(&self) -> &ChannelPlan {
        &self.channel_plan
    }
}

static REGULATORY: Mutex<Option<RtwRegulatory>> = Mutex::new(None);

/// 访问驱动监管状态；rtw_regd_init 之前返回 None
pub fn with_regulatory<R>(f: impl FnOnce(&mut RtwRegulatory) -> R) -> Option<R> {
    REGULATORY.lock().as_mut().map(f)
}

/// 雷达频率区间判定：5260..=5700 MHz（对应 _rtw_is_radar_freq）
#[inline]
pub fn rtw_is_radar_freq(center_freq: u32) -> bool {
    (5260..=5700).contains(&center_freq)
}

/// 硬编码标志下发（对应 _rtw_reg_apply_flags）
///
/// 先将所有频段所有信道置禁用，再按信道集逐项放开：
/// 主动扫描项清空标志，被动扫描项置 PASSIVE_SCAN。
/// wiphy 不认识的频率（信道号超 14 等）跳过。
pub fn rtw_reg_apply_flags(wiphy: &mut Wiphy) {
    let plan = with_regulatory(|reg| *reg.channel_plan()).unwrap_or_default();
    apply_channel_plan_flags(wiphy, &plan);
}

fn apply_channel_plan_flags(wiphy: &mut Wiphy, plan: &ChannelPlan) {
    for band in wiphy.bands.iter_mut().flatten() {
        for ch in band.channels.iter_mut() {
            ch.flags = channel_flags::DISABLED;
        }
    }

    for entry in plan.iter() {
        let freq = match channel_to_frequency(entry.channel, Band::TwoGhz) {
            Some(freq) => freq,
            None => continue,
        };
        if let Some(ch) = wiphy.channel_mut(freq) {
            ch.flags = match entry.scan_type {
                ScanType::Passive => channel_flags::PASSIVE_SCAN,
                ScanType::Active => 0,
            };
        }
    }
}

/// 雷达区间标志（对应 _rtw_reg_apply_radar_flags）
///
/// 仅 5G 频段：雷达区间内未禁用的信道一律开 DFS，并同时禁 IBSS、仅被动扫描
/// （STA/adhoc/AP 各模式 DFS 支持就绪前的保守限制）。
pub fn rtw_reg_apply_radar_flags(wiphy: &mut Wiphy) {
    let band = match wiphy.band_mut(Band::FiveGhz) {
        Some(band) => band,
        None => return,
    };
    for ch in band.channels.iter_mut() {
        if !rtw_is_radar_freq(ch.center_freq) {
            continue;
        }
        if ch.flags & channel_flags::DISABLED == 0 {
            ch.flags |=
                channel_flags::RADAR | channel_flags::NO_IBSS | channel_flags::PASSIVE_SCAN;
        }
    }
}

/// beacon/IBSS 限制放开（对应 _rtw_reg_apply_beaconing_flags）
///
/// 雷达信道不动。country IE 事件按 11d 规则放开：规则允许即清
/// NO_IBSS / PASSIVE_SCAN（初始化时自定义世界域已先行收紧）；
/// 其余事件只对收到过 beacon 的信道放开。
pub fn rtw_reg_apply_beaconing_flags(wiphy: &mut Wiphy, initiator: RegInitiator) {
    let regd = wiphy.regd();
    for band in wiphy.bands.iter_mut().flatten() {
        for ch in band.channels.iter_mut() {
            if rtw_is_radar_freq(ch.center_freq) || ch.flags & channel_flags::RADAR != 0 {
                continue;
            }
            if initiator == RegInitiator::CountryIe {
                let rule = match regd.and_then(|rd| rd.freq_reg_info(ch.center_freq)) {
                    Some(rule) => rule,
                    None => continue,
                };
                if rule.flags & reg_rule_flags::NO_IBSS == 0 {
                    ch.flags &= !channel_flags::NO_IBSS;
                }
                if rule.flags & reg_rule_flags::PASSIVE_SCAN == 0 {
                    ch.flags &= !channel_flags::PASSIVE_SCAN;
                }
            } else if ch.beacon_found {
                ch.flags &= !(channel_flags::NO_IBSS | channel_flags::PASSIVE_SCAN);
            }
        }
    }
}

/// 信道 12/13 主动扫描放开（对应 _rtw_reg_apply_active_scan_flags）
///
/// 未收到 country IE 时直接放开两信道的主动扫描（仅特定监管 SKU）；
/// 收到 country IE 后须先查该信道规则，规则允许才放开
/// （被动限制由初始化时的自定义监管域先行施加）。
pub fn rtw_reg_apply_active_scan_flags(wiphy: &mut Wiphy, initiator: RegInitiator) {
    let regd = wiphy.regd();
    let band = match wiphy.band_mut(Band::TwoGhz) {
        Some(band) => band,
        None => return,
    };

    // 信道 12、13 的表下标
    const CH12_IDX: usize = 11;
    const CH13_IDX: usize = 12;

    if initiator != RegInitiator::CountryIe {
        for idx in [CH12_IDX, CH13_IDX] {
            if let Some(ch) = band.channels.get_mut(idx) {
                if ch.flags & channel_flags::PASSIVE_SCAN != 0 {
                    ch.flags &= !channel_flags::PASSIVE_SCAN;
                }
            }
        }
        return;
    }

    for idx in [CH12_IDX, CH13_IDX] {
        if let Some(ch) = band.channels.get_mut(idx) {
            let rule = match regd.and_then(|rd| rd.freq_reg_info(ch.center_freq)) {
                Some(rule) => rule,
                None => continue,
            };
            if rule.flags & reg_rule_flags::PASSIVE_SCAN == 0
                && ch.flags & channel_flags::PASSIVE_SCAN != 0
            {
                ch.flags &= !channel_flags::PASSIVE_SCAN;
            }
        }
    }
}

/// 世界域按事件放开（对应 _rtw_reg_apply_world_flags）
pub fn rtw_reg_apply_world_flags(wiphy: &mut Wiphy, initiator: RegInitiator) {
    rtw_reg_apply_beaconing_flags(wiphy, initiator);
    rtw_reg_apply_active_scan_flags(wiphy, initiator);
}

/// 监管事件通知回调（对应 rtw_reg_notifier）
///
/// 无论驱动发起还是 country IE 发起，一律走硬编码标志路径；
/// 逐事件的放开逻辑见 rtw_reg_apply_world_flags / rtw_reg_apply_radar_flags。
pub fn rtw_reg_notifier(wiphy: &mut Wiphy, request: &RegulatoryRequest) {
    log::debug!(
        target: "wireless::rtwdrv::regd",
        "rtw_reg_notifier initiator={:?} alpha2={:?}",
        request.initiator,
        core::str::from_utf8(&request.alpha2).unwrap_or("??")
    );
    rtw_reg_apply_flags(wiphy);
}

/// 选定监管域（对应 _rtw_regdomain_select：始终返回硬编码世界域）
fn rtw_regdomain_select() -> &'static Regdomain {
    &RTW_REGDOM_RD
}

/// 监管域初始化（对应 rtw_regd_init / _rtw_regd_init_wiphy）
///
/// 保存驱动信道集，在 wiphy 上注册通知回调，置 CUSTOM_REG 并清
/// STRICT_REG / DISABLE_BEACON_HINTS，应用硬编码监管域，最后下发硬编码标志。
pub fn rtw_regd_init(wiphy: &mut Wiphy, channel_plan: ChannelPlan) {
    *REGULATORY.lock() = Some(RtwRegulatory::new(channel_plan));

    wiphy.set_reg_notifier(rtw_reg_notifier);

    wiphy.regulatory_flags |= regulatory_flags::CUSTOM_REG;
    wiphy.regulatory_flags &= !regulatory_flags::STRICT_REG;
    wiphy.regulatory_flags &= !regulatory_flags::DISABLE_BEACON_HINTS;

    let regd = rtw_regdomain_select();
    wiphy.apply_custom_regulatory(regd);

    rtw_reg_apply_flags(wiphy);

    log::info!(
        target: "wireless::rtwdrv::regd",
        "rtw_regd_init alpha2={:?} rules={}",
        core::str::from_utf8(&regd.alpha2).unwrap_or("??"),
        regd.rules.len()
    );
}

/// 驱动发起监管事件（对应 rtw_reg_notify_by_driver）
pub fn rtw_reg_notify_by_driver(wiphy: &mut Wiphy) {
    let alpha2 = with_regulatory(|reg| reg.alpha2()).unwrap_or(RTW_REGDOM_RD.alpha2);
    let request = RegulatoryRequest::new(RegInitiator::Driver, alpha2);
    wiphy.notify(&request);
}
