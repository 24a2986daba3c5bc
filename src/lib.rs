//! StarryOS wireless 监管域 crate
//!
//! 整合 rtw 系列 WiFi 驱动监管域（channel legality）内核功能移植：
//! - ieee80211: cfg80211 侧 wiphy / 信道表 / 监管规则抽象
//! - rtwdrv: 驱动侧信道集与 wifi_regd 标志下发逻辑

#![no_std]

pub use ieee80211;
pub use rtwdrv;

use ieee80211::{Band, SupportedBand, Wiphy};
use rtwdrv::ChannelPlan;

/// 无线驱动上下文：wiphy + 监管域
/// 平台初始化时创建，可交给 api/syscall 或上层使用
pub struct WirelessDriver {
    pub wiphy: Wiphy,
}

impl WirelessDriver {
    pub fn wiphy_mut(&mut self) -> &mut Wiphy {
        &mut self.wiphy
    }
}

/// 驱动初始化：建 2.4G 信道表，按信道计划完成监管域初始化
///
/// 对应 rtw 驱动 rtw_wdev_alloc 里设置 wiphy->bands 后调 rtw_regd_init 的流程；
/// 后续监管事件（驱动发起或 country IE）经 wiphy 上注册的回调重新下发标志。
pub fn wireless_driver_init(channel_plan: ChannelPlan) -> WirelessDriver {
    let mut wiphy = Wiphy::new();
    wiphy.bands[Band::TwoGhz as usize] = Some(SupportedBand::band_2ghz());

    rtwdrv::rtw_regd_init(&mut wiphy, channel_plan);

    log::info!(target: "wireless", "wireless: regd init done, plan_len={}",
        rtwdrv::with_regulatory(|reg| reg.channel_plan().len()).unwrap_or(0));

    WirelessDriver { wiphy }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ieee80211::channel_flags;

    #[test]
    fn driver_init_world_plan() {
        let driver = wireless_driver_init(ChannelPlan::world());
        let band = driver.wiphy.band(Band::TwoGhz).unwrap();
        assert_eq!(band.channels.len(), 14);
        // 信道 1 放行，信道 14 不在世界信道计划内
        assert_eq!(band.channels[0].flags, 0);
        assert_eq!(band.channels[13].flags, channel_flags::DISABLED);
    }
}
