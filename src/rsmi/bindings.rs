//! `#[repr(C)]` mirrors of the rocm_smi.h types used by the queries
//!
//! Only the structures and entry points this crate calls are declared.
//! Fixed capacities match the C header.
//!
//! `rsmi_frequencies_t` changed shape in ROCm SMI 6: a leading
//! `has_deep_sleep` flag was added and the capacity grew from 32 to 33.
//! [`RsmiFrequencies`] mirrors the current header and
//! [`RsmiFrequenciesLegacy`] the pre-6 one; the library picks the entry
//! point signature matching the loaded version.

use crate::domain::{FreqRange, VddcPoint};
use std::os::raw::{c_char, c_uint};

/// `RSMI_MAX_NUM_FREQUENCIES`
pub const RSMI_MAX_NUM_FREQUENCIES: usize = 33;

/// `RSMI_MAX_NUM_FREQUENCIES` before ROCm SMI 6
pub const RSMI_LEGACY_MAX_NUM_FREQUENCIES: usize = 32;

/// First library major version using the deep-sleep frequency layout
pub const RSMI_DEEP_SLEEP_LAYOUT_MAJOR: u32 = 6;

/// `RSMI_NUM_VOLTAGE_CURVE_POINTS`
pub const RSMI_NUM_VOLTAGE_CURVE_POINTS: usize = 3;

/// `RSMI_COARSE_GRAIN_GFX_ACTIVITY` (also `RSMI_UTILIZATION_COUNTER_FIRST`)
pub const RSMI_COARSE_GRAIN_GFX_ACTIVITY: c_uint = 0;

/// `RSMI_COARSE_GRAIN_MEM_ACTIVITY`
pub const RSMI_COARSE_GRAIN_MEM_ACTIVITY: c_uint = 1;

/// `rsmi_frequencies_t` (ROCm SMI 6 and later)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsmiFrequencies {
    pub has_deep_sleep: bool,
    pub num_supported: u32,
    pub current: u32,
    pub frequency: [u64; RSMI_MAX_NUM_FREQUENCIES],
}

impl Default for RsmiFrequencies {
    fn default() -> Self {
        Self {
            has_deep_sleep: false,
            num_supported: 0,
            current: 0,
            frequency: [0; RSMI_MAX_NUM_FREQUENCIES],
        }
    }
}

/// `rsmi_frequencies_t` before ROCm SMI 6
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsmiFrequenciesLegacy {
    pub num_supported: u32,
    pub current: u32,
    pub frequency: [u64; RSMI_LEGACY_MAX_NUM_FREQUENCIES],
}

impl Default for RsmiFrequenciesLegacy {
    fn default() -> Self {
        Self {
            num_supported: 0,
            current: 0,
            frequency: [0; RSMI_LEGACY_MAX_NUM_FREQUENCIES],
        }
    }
}

impl From<RsmiFrequenciesLegacy> for RsmiFrequencies {
    fn from(legacy: RsmiFrequenciesLegacy) -> Self {
        let mut frequency = [0; RSMI_MAX_NUM_FREQUENCIES];
        frequency[..RSMI_LEGACY_MAX_NUM_FREQUENCIES].copy_from_slice(&legacy.frequency);
        Self {
            has_deep_sleep: false,
            num_supported: legacy.num_supported,
            current: legacy.current,
            frequency,
        }
    }
}

/// Which `rsmi_frequencies_t` shape a library writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyLayout {
    /// `num_supported, current, frequency[32]`
    Legacy,
    /// `has_deep_sleep, num_supported, current, frequency[33]`
    DeepSleep,
}

impl FrequencyLayout {
    /// Layout used by a library reporting `major` from `rsmi_version_get`
    pub fn for_major(major: u32) -> Self {
        if major >= RSMI_DEEP_SLEEP_LAYOUT_MAJOR {
            Self::DeepSleep
        } else {
            Self::Legacy
        }
    }
}

/// `rsmi_version_t`
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RsmiVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub build: *const c_char,
}

impl Default for RsmiVersion {
    fn default() -> Self {
        Self {
            major: 0,
            minor: 0,
            patch: 0,
            build: std::ptr::null(),
        }
    }
}

/// `rsmi_range_t`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RsmiRange {
    pub lower_bound: u64,
    pub upper_bound: u64,
}

impl From<RsmiRange> for FreqRange {
    fn from(range: RsmiRange) -> Self {
        FreqRange::new(range.lower_bound, range.upper_bound)
    }
}

/// `rsmi_od_vddc_point_t`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RsmiOdVddcPoint {
    pub frequency: u64,
    pub voltage: u64,
}

impl From<RsmiOdVddcPoint> for VddcPoint {
    fn from(point: RsmiOdVddcPoint) -> Self {
        VddcPoint::new(point.frequency, point.voltage)
    }
}

/// `rsmi_od_volt_curve_t`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RsmiOdVoltCurve {
    pub vc_points: [RsmiOdVddcPoint; RSMI_NUM_VOLTAGE_CURVE_POINTS],
}

/// `rsmi_od_volt_freq_data_t`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RsmiOdVoltFreqData {
    pub curr_sclk_range: RsmiRange,
    pub curr_mclk_range: RsmiRange,
    pub sclk_freq_limits: RsmiRange,
    pub mclk_freq_limits: RsmiRange,
    pub curve: RsmiOdVoltCurve,
    pub num_regions: u32,
}

/// `rsmi_utilization_counter_t`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RsmiUtilizationCounter {
    pub counter_type: c_uint,
    pub value: u64,
}

impl RsmiUtilizationCounter {
    /// A counter slot requesting `counter_type`
    pub fn request(counter_type: c_uint) -> Self {
        Self {
            counter_type,
            value: 0,
        }
    }
}

// Entry point signatures. `rsmi_status_t` is returned as a raw c_uint.
pub type InitFn = unsafe extern "C" fn(u64) -> c_uint;
pub type ShutDownFn = unsafe extern "C" fn() -> c_uint;
pub type BusyPercentFn = unsafe extern "C" fn(u32, *mut u32) -> c_uint;
pub type UtilizationCountFn =
    unsafe extern "C" fn(u32, *mut RsmiUtilizationCounter, u32, *mut u64) -> c_uint;
pub type PerfLevelFn = unsafe extern "C" fn(u32, *mut c_uint) -> c_uint;
pub type OverdriveLevelFn = unsafe extern "C" fn(u32, *mut u32) -> c_uint;
pub type GpuClkFreqFn = unsafe extern "C" fn(u32, c_uint, *mut RsmiFrequencies) -> c_uint;
pub type LegacyGpuClkFreqFn =
    unsafe extern "C" fn(u32, c_uint, *mut RsmiFrequenciesLegacy) -> c_uint;
pub type VersionFn = unsafe extern "C" fn(*mut RsmiVersion) -> c_uint;
pub type PowerAveFn = unsafe extern "C" fn(u32, u32, *mut u64) -> c_uint;
pub type PowerCapFn = unsafe extern "C" fn(u32, u32, *mut u64) -> c_uint;
pub type PowerCapDefaultFn = unsafe extern "C" fn(u32, *mut u64) -> c_uint;
pub type PowerCapRangeFn = unsafe extern "C" fn(u32, u32, *mut u64, *mut u64) -> c_uint;
pub type OdVoltInfoFn = unsafe extern "C" fn(u32, *mut RsmiOdVoltFreqData) -> c_uint;
