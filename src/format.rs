//! Display formatting of electrical quantities.
//!
//! Values are scaled to the SI prefix a student would read off a meter.
//! Infinite values (a shorted circuit's current, an open circuit's
//! resistance) render as `∞`.

/// Format a current: `1.50 A`, `90.0 mA`, `450 µA`.
pub fn format_current(amps: f64) -> String {
    if amps.is_infinite() {
        return "∞ A".to_string();
    }
    if amps >= 1.0 {
        format!("{:.2} A", amps)
    } else if amps >= 0.001 {
        format!("{:.1} mA", amps * 1000.0)
    } else {
        format!("{:.0} µA", amps * 1_000_000.0)
    }
}

/// Format a voltage: `9.00 V`, `450.0 mV`.
pub fn format_voltage(volts: f64) -> String {
    if volts.is_infinite() {
        return "∞ V".to_string();
    }
    if volts >= 1.0 {
        format!("{:.2} V", volts)
    } else {
        format!("{:.1} mV", volts * 1000.0)
    }
}

/// Format a resistance: `∞ Ω`, `2.20 MΩ`, `4.70 kΩ`, `100.0 Ω`.
pub fn format_resistance(ohms: f64) -> String {
    if ohms.is_infinite() {
        "∞ Ω".to_string()
    } else if ohms >= 1_000_000.0 {
        format!("{:.2} MΩ", ohms / 1_000_000.0)
    } else if ohms >= 1000.0 {
        format!("{:.2} kΩ", ohms / 1000.0)
    } else {
        format!("{:.1} Ω", ohms)
    }
}

/// Format a power: `1.62 W`, `810.00 mW`.
pub fn format_power(watts: f64) -> String {
    if watts.is_infinite() {
        return "∞ W".to_string();
    }
    if watts >= 1.0 {
        format!("{:.2} W", watts)
    } else {
        format!("{:.2} mW", watts * 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_current() {
        assert_eq!(format_current(1.5), "1.50 A");
        assert_eq!(format_current(0.09), "90.0 mA");
        assert_eq!(format_current(0.00045), "450 µA");
        assert_eq!(format_current(0.0), "0 µA");
        assert_eq!(format_current(f64::INFINITY), "∞ A");
    }

    #[test]
    fn test_format_voltage() {
        assert_eq!(format_voltage(9.0), "9.00 V");
        assert_eq!(format_voltage(0.45), "450.0 mV");
    }

    #[test]
    fn test_format_resistance() {
        assert_eq!(format_resistance(f64::INFINITY), "∞ Ω");
        assert_eq!(format_resistance(2_200_000.0), "2.20 MΩ");
        assert_eq!(format_resistance(4700.0), "4.70 kΩ");
        assert_eq!(format_resistance(100.0), "100.0 Ω");
    }

    #[test]
    fn test_format_power() {
        assert_eq!(format_power(1.62), "1.62 W");
        assert_eq!(format_power(0.81), "810.00 mW");
    }
}
