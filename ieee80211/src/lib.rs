//! # ieee80211 — IEEE 802.11 / cfg80211 监管域抽象
//!
//! 复刻 rtw 驱动监管域路径依赖的 Linux 内核 **cfg80211** 接口，
//! 便于驱动侧与 os_dep/linux/wifi_regd.c 逻辑对齐。
//!
//! ## 模块与 Linux 对应
//!
//! | 模块       | Linux 位置                  | 说明 |
//! |------------|-----------------------------|------|
//! | ieee80211  | include/linux/ieee80211.h   | 频段、信道、信道标志、信道号/频率互换 |
//! | cfg80211   | net/cfg80211.h              | wiphy、supported_band、regulatory_request、reg_notifier |
//! | regulatory | include/net/regulatory.h    | reg_rule、regdomain、freq_reg_info |

#![no_std]

pub mod cfg80211;
pub mod ieee80211;
pub mod regulatory;

pub use cfg80211::{
    regulatory_flags, RegInitiator, RegNotifier, RegulatoryRequest, SupportedBand, Wiphy,
};
pub use ieee80211::{
    channel_flags, channel_to_frequency, frequency_to_channel, Band, Channel, NUM_BANDS,
};
pub use regulatory::{reg_rule_flags, FreqRange, PowerRule, RegRule, Regdomain};
