//! Runtime-loaded librocm_smi64
//!
//! The library is opened with libloading and every entry point is resolved
//! once, when the library is loaded. The library version decides which
//! `rsmi_frequencies_t` layout the clock entry point is called with.

use crate::domain::{ClockDomain, Status};
use crate::error::RsmiError;
use crate::rsmi::bindings::{
    BusyPercentFn, FrequencyLayout, GpuClkFreqFn, InitFn, LegacyGpuClkFreqFn, OdVoltInfoFn,
    OverdriveLevelFn, PerfLevelFn, PowerAveFn, PowerCapDefaultFn, PowerCapFn, PowerCapRangeFn,
    RsmiFrequencies, RsmiFrequenciesLegacy, RsmiOdVoltFreqData, RsmiUtilizationCounter,
    RsmiVersion, ShutDownFn, UtilizationCountFn, VersionFn,
};
use crate::rsmi::traits::RsmiAdapter;

use libloading::{Library, Symbol};

/// Library names tried, in order, when no explicit path is configured
pub const DEFAULT_LIBRARY_NAMES: [&str; 5] = [
    "librocm_smi64.so",
    "librocm_smi64.so.7",
    "librocm_smi64.so.6",
    "librocm_smi64.so.5",
    "/opt/rocm/lib/librocm_smi64.so",
];

/// Highest number of power sensors counted per device
pub const MAX_POWER_SENSORS: u32 = 8;

/// `rsmi_dev_gpu_clk_freq_get` bound to the layout its library writes
#[derive(Clone, Copy)]
enum GpuClkFreq {
    DeepSleep(GpuClkFreqFn),
    Legacy(LegacyGpuClkFreqFn),
}

struct Symbols {
    init: InitFn,
    shut_down: ShutDownFn,
    busy_percent: BusyPercentFn,
    utilization_count: UtilizationCountFn,
    perf_level: PerfLevelFn,
    overdrive_level: OverdriveLevelFn,
    mem_overdrive_level: OverdriveLevelFn,
    gpu_clk_freq: GpuClkFreq,
    od_volt_info: OdVoltInfoFn,
    power_ave: PowerAveFn,
    power_cap: PowerCapFn,
    power_cap_default: PowerCapDefaultFn,
    power_cap_range: PowerCapRangeFn,
}

impl Symbols {
    fn resolve(lib: &Library, layout: FrequencyLayout) -> Result<Self, RsmiError> {
        // SAFETY: each type alias matches the prototype in rocm_smi.h, and
        // the clock entry point is typed after the layout of this library
        unsafe {
            let gpu_clk_freq = match layout {
                FrequencyLayout::DeepSleep => {
                    GpuClkFreq::DeepSleep(symbol(lib, b"rsmi_dev_gpu_clk_freq_get\0")?)
                }
                FrequencyLayout::Legacy => {
                    GpuClkFreq::Legacy(symbol(lib, b"rsmi_dev_gpu_clk_freq_get\0")?)
                }
            };
            Ok(Self {
                init: symbol(lib, b"rsmi_init\0")?,
                shut_down: symbol(lib, b"rsmi_shut_down\0")?,
                busy_percent: symbol(lib, b"rsmi_dev_busy_percent_get\0")?,
                utilization_count: symbol(lib, b"rsmi_utilization_count_get\0")?,
                perf_level: symbol(lib, b"rsmi_dev_perf_level_get\0")?,
                overdrive_level: symbol(lib, b"rsmi_dev_overdrive_level_get\0")?,
                mem_overdrive_level: symbol(lib, b"rsmi_dev_mem_overdrive_level_get\0")?,
                gpu_clk_freq,
                od_volt_info: symbol(lib, b"rsmi_dev_od_volt_info_get\0")?,
                power_ave: symbol(lib, b"rsmi_dev_power_ave_get\0")?,
                power_cap: symbol(lib, b"rsmi_dev_power_cap_get\0")?,
                power_cap_default: symbol(lib, b"rsmi_dev_power_cap_default_get\0")?,
                power_cap_range: symbol(lib, b"rsmi_dev_power_cap_range_get\0")?,
            })
        }
    }
}

/// Copy a function pointer out of the library
///
/// # Safety
/// `T` must be the correct function pointer type for `name`, and the
/// pointer must not be called after `lib` is dropped.
unsafe fn symbol<T: Copy>(lib: &Library, name: &[u8]) -> Result<T, RsmiError> {
    let sym: Symbol<T> = lib.get(name).map_err(|e| {
        let printable = String::from_utf8_lossy(name.strip_suffix(b"\0").unwrap_or(name));
        RsmiError::SymbolNotFound(format!("{}: {}", printable, e))
    })?;
    Ok(*sym)
}

/// Ask the library for its version and pick the matching frequency layout
///
/// `rsmi_version_get` does not need `rsmi_init`.
fn detect_layout(lib: &Library) -> Result<(RsmiVersion, FrequencyLayout), RsmiError> {
    // SAFETY: VersionFn matches rsmi_version_get
    let version_get: VersionFn = unsafe { symbol(lib, b"rsmi_version_get\0")? };

    let mut version = RsmiVersion::default();
    // SAFETY: the pointer comes from an exclusive reference valid for the call
    let status = Status::from_raw(unsafe { version_get(&mut version) });
    if !status.is_success() {
        return Err(RsmiError::UnsupportedVersion(format!(
            "rsmi_version_get failed: {}",
            status
        )));
    }
    if version.major == 0 {
        return Err(RsmiError::UnsupportedVersion(format!(
            "unrecognized version {}.{}.{}",
            version.major, version.minor, version.patch
        )));
    }

    Ok((version, FrequencyLayout::for_major(version.major)))
}

/// Handle to a loaded librocm_smi64
///
/// Shuts the library down on drop if [`RsmiLibrary::init`] succeeded.
pub struct RsmiLibrary {
    symbols: Symbols,
    layout: FrequencyLayout,
    initialized: bool,
    // Keeps the resolved function pointers valid; must outlive `symbols`.
    _lib: Library,
}

impl RsmiLibrary {
    /// Load the library from `path`, or from the default locations
    pub fn load(path: Option<&str>) -> Result<Self, RsmiError> {
        let lib = match path {
            Some(path) => open(path)?,
            None => open_default()?,
        };
        let (version, layout) = detect_layout(&lib)?;
        log::debug!(
            "ROCm SMI {}.{}.{}, {:?} frequency layout",
            version.major,
            version.minor,
            version.patch,
            layout
        );
        let symbols = Symbols::resolve(&lib, layout)?;

        Ok(Self {
            symbols,
            layout,
            initialized: false,
            _lib: lib,
        })
    }

    /// Call `rsmi_init` and return its status
    pub fn init(&mut self, flags: u64) -> Status {
        // SAFETY: rsmi_init takes its flags by value
        let status = Status::from_raw(unsafe { (self.symbols.init)(flags) });
        self.initialized = status.is_success();

        if self.initialized {
            log::debug!("rsmi_init succeeded (flags {:#x})", flags);
        } else {
            log::warn!("rsmi_init failed: {}", status);
        }
        status
    }

    /// Whether `rsmi_init` succeeded on this handle
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The `rsmi_frequencies_t` layout of the loaded library
    pub fn frequency_layout(&self) -> FrequencyLayout {
        self.layout
    }
}

fn open(path: &str) -> Result<Library, RsmiError> {
    // SAFETY: loading librocm_smi64 runs no initialisers with preconditions
    let lib = unsafe { Library::new(path) }
        .map_err(|e| RsmiError::LibraryNotFound(format!("{}: {}", path, e)))?;
    log::debug!("Loaded ROCm SMI from {}", path);
    Ok(lib)
}

fn open_default() -> Result<Library, RsmiError> {
    let mut failures = Vec::with_capacity(DEFAULT_LIBRARY_NAMES.len());
    for name in DEFAULT_LIBRARY_NAMES {
        match open(name) {
            Ok(lib) => return Ok(lib),
            Err(e) => {
                log::debug!("{}", e);
                failures.push(name);
            }
        }
    }
    Err(RsmiError::LibraryNotFound(format!(
        "tried {}",
        failures.join(", ")
    )))
}

impl Drop for RsmiLibrary {
    fn drop(&mut self) {
        if !self.initialized {
            return;
        }
        // SAFETY: init succeeded on this handle and the library is still loaded
        let status = Status::from_raw(unsafe { (self.symbols.shut_down)() });
        if status.is_success() {
            log::debug!("rsmi_shut_down succeeded");
        } else {
            log::warn!("rsmi_shut_down failed: {}", status);
        }
    }
}

// SAFETY for every call below: output pointers come from exclusive
// references that outlive the call, and slice lengths are passed alongside
// their pointers.
impl RsmiAdapter for RsmiLibrary {
    fn busy_percent(&self, dv_ind: u32, percent: &mut u32) -> Status {
        Status::from_raw(unsafe { (self.symbols.busy_percent)(dv_ind, percent) })
    }

    fn utilization_count(
        &self,
        dv_ind: u32,
        counters: &mut [RsmiUtilizationCounter],
        timestamp: &mut u64,
    ) -> Status {
        let count = counters.len() as u32;
        Status::from_raw(unsafe {
            (self.symbols.utilization_count)(dv_ind, counters.as_mut_ptr(), count, timestamp)
        })
    }

    fn perf_level(&self, dv_ind: u32, level: &mut u32) -> Status {
        Status::from_raw(unsafe { (self.symbols.perf_level)(dv_ind, level) })
    }

    fn overdrive_level(&self, dv_ind: u32, od: &mut u32) -> Status {
        Status::from_raw(unsafe { (self.symbols.overdrive_level)(dv_ind, od) })
    }

    fn mem_overdrive_level(&self, dv_ind: u32, od: &mut u32) -> Status {
        Status::from_raw(unsafe { (self.symbols.mem_overdrive_level)(dv_ind, od) })
    }

    fn gpu_clk_freq(
        &self,
        dv_ind: u32,
        domain: ClockDomain,
        freqs: &mut RsmiFrequencies,
    ) -> Status {
        match self.symbols.gpu_clk_freq {
            GpuClkFreq::DeepSleep(get) => {
                Status::from_raw(unsafe { get(dv_ind, domain.as_raw(), freqs) })
            }
            GpuClkFreq::Legacy(get) => {
                let mut legacy = RsmiFrequenciesLegacy::default();
                let status = Status::from_raw(unsafe { get(dv_ind, domain.as_raw(), &mut legacy) });
                *freqs = legacy.into();
                status
            }
        }
    }

    fn od_volt_info(&self, dv_ind: u32, data: &mut RsmiOdVoltFreqData) -> Status {
        Status::from_raw(unsafe { (self.symbols.od_volt_info)(dv_ind, data) })
    }

    // ROCm SMI has no sensor count call; sensors are numbered from 0, so
    // count the leading indices that answer an average power read.
    fn power_sensor_count(&self, dv_ind: u32, count: &mut u16) -> Status {
        let mut power = 0;
        let mut sensors = 0;
        while sensors < MAX_POWER_SENSORS {
            let status =
                Status::from_raw(unsafe { (self.symbols.power_ave)(dv_ind, sensors, &mut power) });
            if !status.is_success() {
                if sensors == 0 {
                    return status;
                }
                break;
            }
            sensors += 1;
        }
        *count = sensors as u16;
        Status::Success
    }

    fn power_ave(&self, dv_ind: u32, sensor: u32, power: &mut u64) -> Status {
        Status::from_raw(unsafe { (self.symbols.power_ave)(dv_ind, sensor, power) })
    }

    fn power_cap(&self, dv_ind: u32, sensor: u32, cap: &mut u64) -> Status {
        Status::from_raw(unsafe { (self.symbols.power_cap)(dv_ind, sensor, cap) })
    }

    fn power_cap_default(&self, dv_ind: u32, cap: &mut u64) -> Status {
        Status::from_raw(unsafe { (self.symbols.power_cap_default)(dv_ind, cap) })
    }

    fn power_cap_range(&self, dv_ind: u32, sensor: u32, max: &mut u64, min: &mut u64) -> Status {
        Status::from_raw(unsafe { (self.symbols.power_cap_range)(dv_ind, sensor, max, min) })
    }
}
