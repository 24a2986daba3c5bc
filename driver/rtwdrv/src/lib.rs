//! RTW WiFi 驱动监管域 (os_dep)
//!
//! 对应 rtw 系列驱动 os_dep/linux/wifi_regd.c 与 mlme_ext 信道集的移植：
//! - 信道集 (channel_plan) - 适配器自身允许的信道及扫描方式
//! - 监管域 (regd) - 硬编码世界域、监管事件回调、每信道标志下发

#![no_std]

mod channel_plan;
mod regd;

pub use channel_plan::{ChannelPlan, ChannelPlanEntry, ScanType, MAX_CHANNEL_NUM};
pub use regd::{
    rtw_is_radar_freq, rtw_reg_apply_active_scan_flags, rtw_reg_apply_beaconing_flags,
    rtw_reg_apply_flags, rtw_reg_apply_radar_flags, rtw_reg_apply_world_flags,
    rtw_reg_notifier, rtw_reg_notify_by_driver, rtw_regd_init, with_regulatory, RtwRegulatory,
    RTW_2GHZ_CH01_11, RTW_2GHZ_CH12_13, RTW_2GHZ_CH14,
};
