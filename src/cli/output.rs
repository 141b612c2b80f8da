//! Output formatting utilities
//!
//! Provides table and JSON output formatting for CLI commands. A failed
//! reading is still printed: its payload is neutral, so tables show the
//! status instead of the zeroed values.

use crate::cli::args::OutputFormat;
use crate::domain::power::watts;
use crate::domain::{
    BusyPercent, ClockDomain, Frequencies, OverdriveLevels, OverdriveStep, PerfLevelReading,
    PowerReading, PowerStep, Status, UtilizationCounters, VoltCurve,
};
use serde::Serialize;
use std::io::{self, Write};

/// Format and write output based on the selected format
pub fn write_output<W, T>(out: &mut W, data: &T, format: OutputFormat) -> io::Result<()>
where
    W: Write,
    T: Serialize + TableDisplay,
{
    match format {
        OutputFormat::Table => {
            writeln!(out, "{}", data.to_table().trim_end())?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data).map_err(io::Error::other)?;
            writeln!(out, "{}", json)?;
        }
        OutputFormat::Compact => {
            writeln!(out, "{}", data.to_compact())?;
        }
    }

    Ok(())
}

/// Trait for types that can be displayed as a table
pub trait TableDisplay {
    /// Format as a table string
    fn to_table(&self) -> String;

    /// Format as a compact single line
    fn to_compact(&self) -> String {
        self.to_table().trim_end().replace('\n', " | ")
    }
}

fn unavailable(status: Status) -> String {
    format!("unavailable ({})", status)
}

fn mhz(hz: u64) -> u64 {
    hz / 1_000_000
}

/// A reading tagged with the device it came from
#[derive(Debug, Clone, Serialize)]
pub struct GpuReading<T> {
    pub gpu: u32,
    #[serde(flatten)]
    pub reading: T,
}

impl<T> GpuReading<T> {
    pub fn new(gpu: u32, reading: T) -> Self {
        Self { gpu, reading }
    }
}

impl<T: TableDisplay> TableDisplay for GpuReading<T> {
    fn to_table(&self) -> String {
        format!("[{}] {}", self.gpu, self.reading.to_table())
    }

    fn to_compact(&self) -> String {
        format!("{}:{}", self.gpu, self.reading.to_compact())
    }
}

impl TableDisplay for BusyPercent {
    fn to_table(&self) -> String {
        if !self.status.is_success() {
            return format!("Busy: {}", unavailable(self.status));
        }
        format!("Busy: {}%", self.percent)
    }

    fn to_compact(&self) -> String {
        if !self.status.is_success() {
            return format!("busy=err({})", self.status.as_raw());
        }
        format!("busy={}%", self.percent)
    }
}

impl TableDisplay for UtilizationCounters {
    fn to_table(&self) -> String {
        if !self.status.is_success() {
            return format!("Utilization: {}", unavailable(self.status));
        }
        format!(
            "Utilization:\n  GFX activity: {}\n  MEM activity: {}\n  Timestamp: {} ns",
            self.gfx_activity, self.mem_activity, self.timestamp
        )
    }

    fn to_compact(&self) -> String {
        if !self.status.is_success() {
            return format!("util=err({})", self.status.as_raw());
        }
        format!("gfx={} mem={}", self.gfx_activity, self.mem_activity)
    }
}

impl TableDisplay for PerfLevelReading {
    fn to_table(&self) -> String {
        if !self.status.is_success() {
            return format!("Performance level: {}", unavailable(self.status));
        }
        format!("Performance level: {}", self.level)
    }

    fn to_compact(&self) -> String {
        if !self.status.is_success() {
            return format!("perf=err({})", self.status.as_raw());
        }
        format!("perf={}", self.level)
    }
}

impl TableDisplay for OverdriveLevels {
    fn to_table(&self) -> String {
        match (self.graphics_level(), self.memory_level()) {
            (Some(graphics), Some(memory)) => format!(
                "Overdrive:\n  Graphics: {}%\n  Memory: {}%",
                graphics, memory
            ),
            (Some(graphics), None) => format!(
                "Overdrive:\n  Graphics: {}%\n  Memory: {}",
                graphics,
                unavailable(self.status)
            ),
            _ => format!("Overdrive: {}", unavailable(self.status)),
        }
    }

    fn to_compact(&self) -> String {
        let code = self.status.as_raw();
        match (self.graphics_level(), self.failed_step) {
            (Some(graphics), Some(OverdriveStep::Memory)) => {
                format!("od_gfx={}% od_mem=err({})", graphics, code)
            }
            (Some(graphics), _) => format!("od_gfx={}% od_mem={}%", graphics, self.memory),
            (None, _) => format!("od=err({})", code),
        }
    }
}

impl TableDisplay for PowerReading {
    fn to_table(&self) -> String {
        if !self.completed(PowerStep::SensorCount) {
            return format!("Power: {}", unavailable(self.status));
        }

        let mut output = format!("Power:\n  Sensors: {}\n", self.sensor_count);
        if self.completed(PowerStep::SensorPower) {
            for (i, power) in self.power_per_sensor.iter().enumerate() {
                output.push_str(&format!("  Sensor {}: {:.1} W", i, watts(*power)));
                if let Some(cap) = self.cap_per_sensor.get(i) {
                    output.push_str(&format!(" (cap {:.1} W)", watts(*cap)));
                }
                output.push('\n');
            }
            output.push_str(&format!("  Average: {:.1} W\n", watts(self.average_power)));
        }
        if self.completed(PowerStep::DefaultCap) {
            output.push_str(&format!("  Default cap: {:.1} W\n", watts(self.default_cap)));
        }
        if self.completed(PowerStep::CapRange) {
            output.push_str(&format!(
                "  Cap range: {:.1}-{:.1} W\n",
                watts(self.cap_range.min),
                watts(self.cap_range.max)
            ));
        }
        if let Some(step) = self.failed_step {
            output.push_str(&format!("  {}: {}\n", step, unavailable(self.status)));
        }
        output
    }

    fn to_compact(&self) -> String {
        let code = self.status.as_raw();
        if !self.completed(PowerStep::SensorPower) {
            return format!("power=err({})", code);
        }

        let average = format!("power={:.1}W", watts(self.average_power));
        match self.failed_step {
            Some(PowerStep::DefaultCap) => format!("{} default_cap=err({})", average, code),
            Some(PowerStep::CapRange) => format!("{} cap_range=err({})", average, code),
            Some(_) => format!("{} cap=err({})", average, code),
            None => match self.cap_per_sensor.first() {
                Some(cap) => format!("{} cap={:.1}W", average, watts(*cap)),
                None => average,
            },
        }
    }
}

/// Supported frequencies of one clock domain
#[derive(Debug, Clone, Serialize)]
pub struct ClockReading {
    pub domain: ClockDomain,
    #[serde(flatten)]
    pub frequencies: Frequencies,
}

impl ClockReading {
    pub fn new(domain: ClockDomain, frequencies: Frequencies) -> Self {
        Self {
            domain,
            frequencies,
        }
    }
}

impl TableDisplay for ClockReading {
    fn to_table(&self) -> String {
        let freqs = &self.frequencies;
        if !freqs.status.is_success() {
            return format!("{}: {}\n", self.domain, unavailable(freqs.status));
        }

        let mut output = format!("{}: {} supported\n", self.domain, freqs.num_supported);
        for (i, hz) in freqs.frequencies.iter().enumerate() {
            let marker = if i == freqs.current as usize { '*' } else { ' ' };
            output.push_str(&format!("  {}{}: {} MHz\n", marker, i, mhz(*hz)));
        }
        output
    }

    fn to_compact(&self) -> String {
        let freqs = &self.frequencies;
        if !freqs.status.is_success() {
            return format!("{}=err({})", self.domain, freqs.status.as_raw());
        }
        match freqs.current_frequency() {
            Some(hz) => format!("{}={}MHz", self.domain, mhz(hz)),
            None => format!("{}=?", self.domain),
        }
    }
}

/// Clock readings for several domains of one device
#[derive(Debug, Clone, Serialize)]
pub struct ClockList {
    pub gpu: u32,
    pub clocks: Vec<ClockReading>,
}

impl TableDisplay for ClockList {
    fn to_table(&self) -> String {
        let mut output = format!("[{}] Clocks\n", self.gpu);
        for clock in &self.clocks {
            output.push_str(&clock.to_table());
        }
        output
    }

    fn to_compact(&self) -> String {
        let clocks: Vec<String> = self.clocks.iter().map(|c| c.to_compact()).collect();
        format!("{}:{}", self.gpu, clocks.join(" "))
    }
}

impl TableDisplay for VoltCurve {
    fn to_table(&self) -> String {
        if !self.status.is_success() {
            return format!("Voltage curve: {}", unavailable(self.status));
        }

        let mut output = String::from("Voltage curve:\n");
        output.push_str(&format!("  SCLK range: {}\n", self.curr_sclk_range));
        output.push_str(&format!("  SCLK limits: {}\n", self.sclk_limits));
        output.push_str(&format!("  MCLK range: {}\n", self.curr_mclk_range));
        output.push_str(&format!("  MCLK limits: {}\n", self.mclk_limits));
        output.push_str(&format!("  Regions: {}\n", self.num_regions));
        for (i, point) in self.points.iter().enumerate() {
            output.push_str(&format!(
                "    {}: {} MHz @ {} mV\n",
                i,
                mhz(point.frequency),
                point.voltage
            ));
        }
        output
    }

    fn to_compact(&self) -> String {
        if !self.status.is_success() {
            return format!("curve=err({})", self.status.as_raw());
        }
        let points: Vec<String> = self
            .points
            .iter()
            .map(|p| format!("{}MHz@{}mV", mhz(p.frequency), p.voltage))
            .collect();
        format!("sclk={} curve=[{}]", self.curr_sclk_range, points.join(","))
    }
}

/// Every metric of one device
#[derive(Debug, Clone, Serialize)]
pub struct DeviceReport {
    pub gpu: u32,
    pub busy: BusyPercent,
    pub utilization: UtilizationCounters,
    pub perf_level: PerfLevelReading,
    pub overdrive: OverdriveLevels,
    pub clocks: Vec<ClockReading>,
    pub volt_curve: VoltCurve,
    pub power: PowerReading,
}

impl TableDisplay for DeviceReport {
    fn to_table(&self) -> String {
        let mut output = format!("[{}] ROCm SMI telemetry\n", self.gpu);
        output.push_str(&format!("{}\n", self.busy.to_table()));
        output.push_str(&format!("{}\n", self.utilization.to_table()));
        output.push_str(&format!("{}\n", self.perf_level.to_table()));
        output.push_str(&format!("{}\n", self.overdrive.to_table()));
        output.push_str("Clocks:\n");
        for clock in &self.clocks {
            output.push_str(&clock.to_table());
        }
        output.push_str(&format!("{}\n", self.volt_curve.to_table()));
        output.push_str(&format!("{}\n", self.power.to_table().trim_end()));
        output
    }

    fn to_compact(&self) -> String {
        let mut parts = vec![
            self.busy.to_compact(),
            self.utilization.to_compact(),
            self.perf_level.to_compact(),
            self.overdrive.to_compact(),
        ];
        parts.extend(self.clocks.iter().map(|c| c.to_compact()));
        parts.push(self.volt_curve.to_compact());
        parts.push(self.power.to_compact());
        format!("{}:{}", self.gpu, parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FreqRange, QueryResult, VddcPoint};

    fn render<T: Serialize + TableDisplay>(data: &T, format: OutputFormat) -> String {
        let mut out = Vec::new();
        write_output(&mut out, data, format).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_busy_table() {
        let busy = GpuReading::new(0, BusyPercent::from_reply(Status::Success, 37));
        assert_eq!(render(&busy, OutputFormat::Table), "[0] Busy: 37%\n");
        assert_eq!(render(&busy, OutputFormat::Compact), "0:busy=37%\n");
    }

    #[test]
    fn test_failed_reading_shows_status() {
        let busy = BusyPercent::neutral(Status::Permission);
        let table = render(&busy, OutputFormat::Table);
        assert!(table.contains("unavailable"));
        assert!(table.contains("code 4"));
    }

    #[test]
    fn test_json_flattens_reading() {
        let reading = GpuReading::new(2, OverdriveLevels::read(5, 1));
        let json: serde_json::Value =
            serde_json::from_str(&render(&reading, OutputFormat::Json)).unwrap();
        assert_eq!(json["gpu"], 2);
        assert_eq!(json["graphics"], 5);
        assert_eq!(json["memory"], 1);
        assert!(json.get("status").is_some());
    }

    #[test]
    fn test_partial_overdrive_table() {
        let levels = OverdriveLevels::memory_failed(Status::NotSupported, 12);
        let table = levels.to_table();
        assert!(table.contains("Graphics: 12%"));
        assert!(table.contains("Memory: unavailable"));
        assert_eq!(levels.to_compact(), "od_gfx=12% od_mem=err(2)");
    }

    #[test]
    fn test_zero_graphics_with_memory_failure_is_shown() {
        let levels = OverdriveLevels::memory_failed(Status::NotSupported, 0);
        let table = levels.to_table();
        assert!(table.contains("Graphics: 0%"));
        assert!(table.contains("Memory: unavailable"));
        assert_eq!(levels.to_compact(), "od_gfx=0% od_mem=err(2)");

        let failed = OverdriveLevels::graphics_failed(Status::NotSupported);
        assert_eq!(
            failed.to_table(),
            "Overdrive: unavailable (not supported on this device (code 2))"
        );
        assert_eq!(failed.to_compact(), "od=err(2)");
    }

    fn sample_power() -> PowerReading {
        PowerReading {
            status: Status::Success,
            sensor_count: 2,
            power_per_sensor: vec![45_000_000, 31_000_000],
            average_power: 38_000_000,
            cap_per_sensor: vec![203_000_000, 203_000_000],
            default_cap: 220_000_000,
            cap_range: crate::domain::PowerCapRange {
                min: 100_000_000,
                max: 250_000_000,
            },
            failed_step: None,
        }
    }

    #[test]
    fn test_power_table() {
        let table = sample_power().to_table();
        assert!(table.contains("Sensors: 2"));
        assert!(table.contains("Sensor 1: 31.0 W (cap 203.0 W)"));
        assert!(table.contains("Average: 38.0 W"));
        assert!(table.contains("Cap range: 100.0-250.0 W"));
        assert_eq!(sample_power().to_compact(), "power=38.0W cap=203.0W");
    }

    #[test]
    fn test_partial_power_shows_completed_steps() {
        let reading = PowerReading {
            status: Status::Permission,
            cap_per_sensor: Vec::new(),
            default_cap: 0,
            cap_range: Default::default(),
            failed_step: Some(PowerStep::SensorCap),
            ..sample_power()
        };
        let table = reading.to_table();
        assert!(table.contains("Average: 38.0 W"));
        assert!(!table.contains("Default cap"));
        assert!(table.contains("sensor cap: unavailable"));
        assert_eq!(reading.to_compact(), "power=38.0W cap=err(4)");

        let none = PowerReading::neutral(Status::InitError);
        assert!(none.to_table().starts_with("Power: unavailable"));
    }

    #[test]
    fn test_device_report_compact_has_every_metric() {
        let curve = VoltCurve::new(
            Status::Success,
            FreqRange::new(500_000_000, 2_100_000_000),
            FreqRange::new(500_000_000, 2_500_000_000),
            FreqRange::new(96_000_000, 1_000_000_000),
            FreqRange::new(96_000_000, 1_200_000_000),
            vec![VddcPoint::new(800_000_000, 750)],
        );
        let report = DeviceReport {
            gpu: 1,
            busy: BusyPercent::from_reply(Status::Success, 10),
            utilization: UtilizationCounters::neutral(Status::NotSupported),
            perf_level: PerfLevelReading::from_reply(Status::Success, 0),
            overdrive: OverdriveLevels::read(0, 0),
            clocks: Vec::new(),
            volt_curve: curve,
            power: sample_power(),
        };
        let compact = report.to_compact();
        assert!(compact.contains("curve=[800MHz@750mV]"));
        assert!(compact.contains("power=38.0W"));
        assert!(compact.starts_with("1:busy=10%"));
    }

    #[test]
    fn test_clock_table_marks_current() {
        let reading = ClockReading::new(
            ClockDomain::Sys,
            Frequencies::new(Status::Success, 1, vec![300_000_000, 600_000_000, 900_000_000]),
        );
        let table = reading.to_table();
        assert!(table.starts_with("sys: 3 supported"));
        assert!(table.contains(" *1: 600 MHz"));
        assert_eq!(reading.to_compact(), "sys=600MHz");
    }

    #[test]
    fn test_clock_json_has_domain_and_list() {
        let list = ClockList {
            gpu: 0,
            clocks: vec![ClockReading::new(
                ClockDomain::Mem,
                Frequencies::new(Status::Success, 0, vec![96_000_000]),
            )],
        };
        let json: serde_json::Value =
            serde_json::from_str(&render(&list, OutputFormat::Json)).unwrap();
        assert_eq!(json["clocks"][0]["domain"], "mem");
        assert_eq!(json["clocks"][0]["num_supported"], 1);
        assert_eq!(json["clocks"][0]["frequencies"][0], 96_000_000u64);
    }

    #[test]
    fn test_volt_curve_table() {
        let curve = VoltCurve::new(
            Status::Success,
            FreqRange::new(500_000_000, 2_100_000_000),
            FreqRange::new(500_000_000, 2_500_000_000),
            FreqRange::new(96_000_000, 1_000_000_000),
            FreqRange::new(96_000_000, 1_200_000_000),
            vec![VddcPoint::new(800_000_000, 750)],
        );
        let table = curve.to_table();
        assert!(table.contains("SCLK range: 500-2100 MHz"));
        assert!(table.contains("Regions: 1"));
        assert!(table.contains("0: 800 MHz @ 750 mV"));
    }
}
