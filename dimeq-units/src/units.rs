//! Unit definitions organized by category

use std::collections::HashMap;
use std::sync::LazyLock;

use tracing::trace;
use dimeq_core::Number;
use crate::{Unit, Dimension};

/// Global unit registry
pub static UNITS: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::new);

/// Parse a factor literal from the tables below
fn n(s: &str) -> Number {
    Number::from_str(s).expect("unit factor literal is well-formed")
}

/// Registry of all known units
pub struct UnitRegistry {
    units: HashMap<String, Unit>,
    aliases: HashMap<String, String>,
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitRegistry {
    pub fn new() -> Self {
        let mut registry = UnitRegistry {
            units: HashMap::new(),
            aliases: HashMap::new(),
        };
        registry.register_all_units();
        registry
    }

    /// Get a unit by symbol or alias
    pub fn get(&self, symbol: &str) -> Option<&Unit> {
        // Try direct lookup first
        if let Some(unit) = self.units.get(symbol) {
            return Some(unit);
        }
        // Try alias lookup
        if let Some(canonical) = self.aliases.get(symbol) {
            trace!(symbol, %canonical, "unit alias");
            return self.units.get(canonical);
        }
        trace!(symbol, "unit not in registry");
        None
    }

    /// Get all units in a category
    pub fn by_category(&self, category: &str) -> Vec<&Unit> {
        self.units.values()
            .filter(|u| u.category == category)
            .collect()
    }

    /// Get all unit symbols
    pub fn symbols(&self) -> Vec<&str> {
        self.units.keys().map(|s| s.as_str()).collect()
    }

    fn register(&mut self, unit: Unit) {
        self.units.insert(unit.symbol.clone(), unit);
    }

    fn alias(&mut self, alias: &str, symbol: &str) {
        self.aliases.insert(alias.to_string(), symbol.to_string());
    }

    fn register_all_units(&mut self) {
        self.register_length_units();
        self.register_mass_units();
        self.register_time_units();
        self.register_temperature_units();
        self.register_current_units();
        self.register_amount_units();
        self.register_area_units();
        self.register_volume_units();
        self.register_velocity_units();
        self.register_force_units();
        self.register_energy_units();
        self.register_power_units();
        self.register_pressure_units();
        self.register_frequency_units();
        self.register_wavenumber_units();
        self.register_electrical_units();
        self.register_angle_units();
    }

    fn register_length_units(&mut self) {
        // SI length units
        self.register(Unit::new("m", "meter", Dimension::LENGTH, n("1"), "length"));
        self.register(Unit::new("km", "kilometer", Dimension::LENGTH, n("1e3"), "length"));
        self.register(Unit::new("cm", "centimeter", Dimension::LENGTH, n("1e-2"), "length"));
        self.register(Unit::new("mm", "millimeter", Dimension::LENGTH, n("1e-3"), "length"));
        self.register(Unit::new("um", "micrometer", Dimension::LENGTH, n("1e-6"), "length"));
        self.register(Unit::new("nm", "nanometer", Dimension::LENGTH, n("1e-9"), "length"));
        self.register(Unit::new("pm", "picometer", Dimension::LENGTH, n("1e-12"), "length"));
        self.register(Unit::new("fm", "femtometer", Dimension::LENGTH, n("1e-15"), "length"));
        self.register(Unit::new("Å", "angstrom", Dimension::LENGTH, n("1e-10"), "length"));

        // Imperial/US length units
        self.register(Unit::new("in", "inch", Dimension::LENGTH, n("0.0254"), "length"));
        self.register(Unit::new("ft", "foot", Dimension::LENGTH, n("0.3048"), "length"));
        self.register(Unit::new("mi", "mile", Dimension::LENGTH, n("1609.344"), "length"));

        // Astronomical
        self.register(Unit::new("au", "astronomical unit", Dimension::LENGTH, n("149597870700"), "length"));
        self.register(Unit::new("ly", "light year", Dimension::LENGTH, n("9460730472580800"), "length"));

        self.alias("meter", "m");
        self.alias("meters", "m");
        self.alias("metre", "m");
        self.alias("kilometer", "km");
        self.alias("nanometer", "nm");
        self.alias("nanometers", "nm");
        self.alias("μm", "um");
        self.alias("micron", "um");
        self.alias("angstrom", "Å");
        self.alias("Angstrom", "Å");
        self.alias("inch", "in");
        self.alias("foot", "ft");
        self.alias("feet", "ft");
        self.alias("mile", "mi");
    }

    fn register_mass_units(&mut self) {
        self.register(Unit::new("kg", "kilogram", Dimension::MASS, n("1"), "mass"));
        self.register(Unit::new("g", "gram", Dimension::MASS, n("1e-3"), "mass"));
        self.register(Unit::new("mg", "milligram", Dimension::MASS, n("1e-6"), "mass"));
        self.register(Unit::new("ug", "microgram", Dimension::MASS, n("1e-9"), "mass"));
        self.register(Unit::new("t", "tonne", Dimension::MASS, n("1e3"), "mass"));
        self.register(Unit::new("lb", "pound", Dimension::MASS, n("0.45359237"), "mass"));
        self.register(Unit::new("oz", "ounce", Dimension::MASS, n("0.028349523125"), "mass"));

        // Particle masses (CODATA 2018)
        self.register(Unit::new("m_e", "electron mass", Dimension::MASS, n("9.1093837015e-31"), "mass"));
        self.register(Unit::new("m_p", "proton mass", Dimension::MASS, n("1.67262192369e-27"), "mass"));
        self.register(Unit::new("u", "atomic mass unit", Dimension::MASS, n("1.66053906660e-27"), "mass"));

        self.alias("kilogram", "kg");
        self.alias("kilograms", "kg");
        self.alias("gram", "g");
        self.alias("grams", "g");
        self.alias("pound", "lb");
        self.alias("lbs", "lb");
        self.alias("μg", "ug");
        self.alias("me", "m_e");
        self.alias("electron mass", "m_e");
        self.alias("mp", "m_p");
        self.alias("Da", "u");
        self.alias("dalton", "u");
    }

    fn register_time_units(&mut self) {
        self.register(Unit::new("s", "second", Dimension::TIME, n("1"), "time"));
        self.register(Unit::new("ms", "millisecond", Dimension::TIME, n("1e-3"), "time"));
        self.register(Unit::new("us", "microsecond", Dimension::TIME, n("1e-6"), "time"));
        self.register(Unit::new("ns", "nanosecond", Dimension::TIME, n("1e-9"), "time"));
        self.register(Unit::new("fs", "femtosecond", Dimension::TIME, n("1e-15"), "time"));
        self.register(Unit::new("min", "minute", Dimension::TIME, n("60"), "time"));
        self.register(Unit::new("h", "hour", Dimension::TIME, n("3600"), "time"));
        self.register(Unit::new("d", "day", Dimension::TIME, n("86400"), "time"));
        self.register(Unit::new("yr", "year", Dimension::TIME, n("31556952"), "time")); // average

        self.alias("second", "s");
        self.alias("seconds", "s");
        self.alias("sec", "s");
        self.alias("μs", "us");
        self.alias("minute", "min");
        self.alias("hour", "h");
        self.alias("hr", "h");
        self.alias("day", "d");
        self.alias("year", "yr");
    }

    fn register_temperature_units(&mut self) {
        // Kelvin is the SI base unit
        self.register(Unit::new("K", "kelvin", Dimension::TEMPERATURE, n("1"), "temperature"));
        self.register(Unit::new("mK", "millikelvin", Dimension::TEMPERATURE, n("1e-3"), "temperature"));

        // Celsius: K = C + 273.15
        self.register(Unit::with_offset(
            "degC", "celsius", Dimension::TEMPERATURE,
            n("1"),
            n("273.15"),
            "temperature"
        ));

        // Fahrenheit: K = (F + 459.67) * 5/9
        self.register(Unit::with_offset(
            "degF", "fahrenheit", Dimension::TEMPERATURE,
            n("5/9"),
            n("45967/180"),
            "temperature"
        ));

        // Rankine: K = R * 5/9
        self.register(Unit::new("R", "rankine", Dimension::TEMPERATURE, n("5/9"), "temperature"));

        self.alias("kelvin", "K");
        self.alias("C", "degC");
        self.alias("celsius", "degC");
        self.alias("°C", "degC");
        self.alias("F", "degF");
        self.alias("fahrenheit", "degF");
        self.alias("°F", "degF");
        self.alias("rankine", "R");
        self.alias("Ra", "R");
    }

    fn register_current_units(&mut self) {
        self.register(Unit::new("A", "ampere", Dimension::CURRENT, n("1"), "current"));
        self.register(Unit::new("mA", "milliampere", Dimension::CURRENT, n("1e-3"), "current"));

        self.alias("ampere", "A");
        self.alias("amp", "A");
    }

    fn register_amount_units(&mut self) {
        self.register(Unit::new("mol", "mole", Dimension::AMOUNT, n("1"), "amount"));
        self.register(Unit::new("mmol", "millimole", Dimension::AMOUNT, n("1e-3"), "amount"));

        self.alias("mole", "mol");
    }

    fn register_area_units(&mut self) {
        self.register(Unit::new("m2", "square meter", Dimension::AREA, n("1"), "area"));
        self.register(Unit::new("cm2", "square centimeter", Dimension::AREA, n("1e-4"), "area"));
        self.register(Unit::new("ha", "hectare", Dimension::AREA, n("1e4"), "area"));
        self.register(Unit::new("b", "barn", Dimension::AREA, n("1e-28"), "area"));

        self.alias("m²", "m2");
        self.alias("cm²", "cm2");
        self.alias("barn", "b");
    }

    fn register_volume_units(&mut self) {
        self.register(Unit::new("m3", "cubic meter", Dimension::VOLUME, n("1"), "volume"));
        self.register(Unit::new("L", "liter", Dimension::VOLUME, n("1e-3"), "volume"));
        self.register(Unit::new("mL", "milliliter", Dimension::VOLUME, n("1e-6"), "volume"));
        self.register(Unit::new("cm3", "cubic centimeter", Dimension::VOLUME, n("1e-6"), "volume"));
        self.register(Unit::new("gal", "gallon", Dimension::VOLUME, n("0.003785411784"), "volume"));

        self.alias("m³", "m3");
        self.alias("liter", "L");
        self.alias("litre", "L");
        self.alias("l", "L");
        self.alias("ml", "mL");
        self.alias("cc", "cm3");
        self.alias("cm³", "cm3");
        self.alias("gallon", "gal");
    }

    fn register_velocity_units(&mut self) {
        self.register(Unit::new("m/s", "meter per second", Dimension::VELOCITY, n("1"), "velocity"));
        self.register(Unit::new("km/h", "kilometer per hour", Dimension::VELOCITY, n("5/18"), "velocity"));
        self.register(Unit::new("c", "speed of light", Dimension::VELOCITY, n("299792458"), "velocity"));

        self.alias("kph", "km/h");
    }

    fn register_force_units(&mut self) {
        self.register(Unit::new("N", "newton", Dimension::FORCE, n("1"), "force"));
        self.register(Unit::new("kN", "kilonewton", Dimension::FORCE, n("1e3"), "force"));
        self.register(Unit::new("mN", "millinewton", Dimension::FORCE, n("1e-3"), "force"));
        self.register(Unit::new("dyn", "dyne", Dimension::FORCE, n("1e-5"), "force"));
        self.register(Unit::new("lbf", "pound-force", Dimension::FORCE, n("4.4482216152605"), "force"));

        self.alias("newton", "N");
        self.alias("newtons", "N");
    }

    fn register_energy_units(&mut self) {
        self.register(Unit::new("J", "joule", Dimension::ENERGY, n("1"), "energy"));
        self.register(Unit::new("kJ", "kilojoule", Dimension::ENERGY, n("1e3"), "energy"));
        self.register(Unit::new("MJ", "megajoule", Dimension::ENERGY, n("1e6"), "energy"));
        self.register(Unit::new("mJ", "millijoule", Dimension::ENERGY, n("1e-3"), "energy"));
        self.register(Unit::new("cal", "calorie", Dimension::ENERGY, n("4.184"), "energy"));
        self.register(Unit::new("kcal", "kilocalorie", Dimension::ENERGY, n("4184"), "energy"));
        self.register(Unit::new("kWh", "kilowatt-hour", Dimension::ENERGY, n("3.6e6"), "energy"));
        self.register(Unit::new("erg", "erg", Dimension::ENERGY, n("1e-7"), "energy"));

        // Electronvolt family (exact since the 2019 SI redefinition)
        self.register(Unit::new("meV", "millielectronvolt", Dimension::ENERGY, n("1.602176634e-22"), "energy"));
        self.register(Unit::new("eV", "electronvolt", Dimension::ENERGY, n("1.602176634e-19"), "energy"));
        self.register(Unit::new("keV", "kiloelectronvolt", Dimension::ENERGY, n("1.602176634e-16"), "energy"));
        self.register(Unit::new("MeV", "megaelectronvolt", Dimension::ENERGY, n("1.602176634e-13"), "energy"));
        self.register(Unit::new("GeV", "gigaelectronvolt", Dimension::ENERGY, n("1.602176634e-10"), "energy"));

        self.alias("joule", "J");
        self.alias("joules", "J");
        self.alias("calorie", "cal");
        self.alias("electronvolt", "eV");
        self.alias("electronvolts", "eV");
    }

    fn register_power_units(&mut self) {
        self.register(Unit::new("W", "watt", Dimension::POWER, n("1"), "power"));
        self.register(Unit::new("kW", "kilowatt", Dimension::POWER, n("1e3"), "power"));
        self.register(Unit::new("mW", "milliwatt", Dimension::POWER, n("1e-3"), "power"));

        self.alias("watt", "W");
        self.alias("watts", "W");
    }

    fn register_pressure_units(&mut self) {
        self.register(Unit::new("Pa", "pascal", Dimension::PRESSURE, n("1"), "pressure"));
        self.register(Unit::new("kPa", "kilopascal", Dimension::PRESSURE, n("1e3"), "pressure"));
        self.register(Unit::new("bar", "bar", Dimension::PRESSURE, n("1e5"), "pressure"));
        self.register(Unit::new("atm", "atmosphere", Dimension::PRESSURE, n("101325"), "pressure"));

        self.alias("pascal", "Pa");
    }

    fn register_frequency_units(&mut self) {
        self.register(Unit::new("Hz", "hertz", Dimension::FREQUENCY, n("1"), "frequency"));
        self.register(Unit::new("kHz", "kilohertz", Dimension::FREQUENCY, n("1e3"), "frequency"));
        self.register(Unit::new("MHz", "megahertz", Dimension::FREQUENCY, n("1e6"), "frequency"));
        self.register(Unit::new("GHz", "gigahertz", Dimension::FREQUENCY, n("1e9"), "frequency"));
        self.register(Unit::new("THz", "terahertz", Dimension::FREQUENCY, n("1e12"), "frequency"));
        self.register(Unit::new("PHz", "petahertz", Dimension::FREQUENCY, n("1e15"), "frequency"));
        self.register(Unit::new("rpm", "revolutions per minute", Dimension::FREQUENCY, n("1/60"), "frequency"));

        self.alias("hertz", "Hz");
    }

    fn register_wavenumber_units(&mut self) {
        // 1 kayser = 1 cm^-1; parsed forms like "cm^-1" also work
        self.register(Unit::new("kayser", "kayser", Dimension::WAVENUMBER, n("100"), "wavenumber"));
    }

    fn register_electrical_units(&mut self) {
        self.register(Unit::new("V", "volt", Dimension::VOLTAGE, n("1"), "electrical"));
        self.register(Unit::new("ohm", "ohm", Dimension::RESISTANCE, n("1"), "electrical"));

        // Charge - "Coul" avoids the clash with Celsius "C"
        self.register(Unit::new("Coul", "coulomb", Dimension::CHARGE, n("1"), "electrical"));

        self.alias("volt", "V");
        self.alias("Ω", "ohm");
        self.alias("coulomb", "Coul");
    }

    fn register_angle_units(&mut self) {
        // Angles are dimensionless; non-radian factors are irrational
        self.register(Unit::new("rad", "radian", Dimension::DIMENSIONLESS, n("1"), "angle"));
        self.register(Unit::new("deg", "degree", Dimension::DIMENSIONLESS,
            Number::from_f64(std::f64::consts::PI / 180.0), "angle"));
        self.register(Unit::new("turn", "turn", Dimension::DIMENSIONLESS, Number::tau(), "angle"));

        self.alias("radian", "rad");
        self.alias("radians", "rad");
        self.alias("degree", "deg");
        self.alias("°", "deg");
    }
}
