//! Unit catalog - the units annotations may name, organized by category

use crate::{Dimension, Unit};
use mensura_core::Number;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Global unit catalog, built on first use and read-only afterwards
pub static UNITS: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::new);

/// Catalog rows: (symbol, singular name, factor to SI, '|'-separated aliases)
type Row = (&'static str, &'static str, Number, &'static str);

/// Registry of all known units
#[derive(Debug)]
pub struct UnitRegistry {
    units: HashMap<String, Unit>,
    aliases: HashMap<String, String>,
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

    /// Get a unit by symbol, name or alias
    ///
    /// Exact matches win; a case-insensitive alias match is the fallback so
    /// "Feet" and "Meters" resolve while "mm" and "Mm"-style symbols stay distinct.
    pub fn get(&self, symbol: &str) -> Option<&Unit> {
        if let Some(unit) = self.units.get(symbol) {
            return Some(unit);
        }
        if let Some(canonical) = self.aliases.get(symbol) {
            return self.units.get(canonical);
        }
        self.aliases
            .get(&symbol.to_lowercase())
            .and_then(|canonical| self.units.get(canonical))
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    fn register(&mut self, unit: Unit) {
        // Names and their plurals are always accepted as identifiers
        let name = unit.name.to_lowercase();
        self.alias(&format!("{}s", name), &unit.symbol);
        self.alias(&name, &unit.symbol);
        self.units.insert(unit.symbol.clone(), unit);
    }

    fn alias(&mut self, alias: &str, symbol: &str) {
        self.aliases.insert(alias.to_string(), symbol.to_string());
    }

    fn register_rows(&mut self, dimension: Dimension, category: &str, rows: Vec<Row>) {
        for (symbol, name, factor, aliases) in rows {
            self.register(Unit::new(symbol, name, dimension, factor, category));
            for alias in aliases.split('|').filter(|a| !a.is_empty()) {
                self.alias(alias, symbol);
            }
        }
    }

    fn register_all_units(&mut self) {
        self.register_length_units();
        self.register_mass_units();
        self.register_time_units();
        self.register_temperature_units();
        self.register_base_units();
        self.register_area_units();
        self.register_volume_units();
        self.register_velocity_units();
        self.register_mechanical_units();
        self.register_angle_units();
    }

    fn register_length_units(&mut self) {
        self.register_rows(Dimension::LENGTH, "length", vec![
            ("m", "meter", Number::from_i64(1), "metre|metres"),
            ("km", "kilometer", Number::from_i64(1000), "kilometre|kilometres"),
            ("cm", "centimeter", Number::decimal(1, -2), "centimetre|centimetres"),
            ("mm", "millimeter", Number::decimal(1, -3), "millimetre|millimetres"),
            ("um", "micrometer", Number::decimal(1, -6), "μm|micron|microns"),
            ("nm", "nanometer", Number::decimal(1, -9), ""),
            ("in", "inch", Number::decimal(254, -4), "inches|\u{2033}"),
            ("ft", "foot", Number::decimal(3048, -4), "feet|\u{2032}"),
            ("yd", "yard", Number::decimal(9144, -4), ""),
            ("mi", "mile", Number::decimal(1609344, -3), ""),
            ("nmi", "nautical mile", Number::from_i64(1852), ""),
            ("au", "astronomical unit", Number::from_i64(149_597_870_700), ""),
            ("ly", "light year", Number::from_i64(9_460_730_472_580_800), "lightyear|lightyears"),
        ]);
    }

    fn register_mass_units(&mut self) {
        self.register_rows(Dimension::MASS, "mass", vec![
            ("kg", "kilogram", Number::from_i64(1), "kilo|kilos"),
            ("g", "gram", Number::decimal(1, -3), "gramme|grammes"),
            ("mg", "milligram", Number::decimal(1, -6), ""),
            ("ug", "microgram", Number::decimal(1, -9), "μg|mcg"),
            ("t", "tonne", Number::from_i64(1000), "metric ton|metric tons"),
            ("lb", "pound", Number::decimal(45359237, -8), "lbs"),
            ("oz", "ounce", Number::decimal(28349523125, -12), ""),
            ("st", "stone", Number::decimal(635029318, -8), ""),
            ("ton", "short ton", Number::decimal(90718474, -5), "tons"),
            ("lton", "long ton", Number::decimal(10160469088, -7), ""),
            ("ct", "carat", Number::decimal(2, -4), ""),
            ("gr", "grain", Number::decimal(6479891, -11), ""),
        ]);
    }

    fn register_time_units(&mut self) {
        self.register_rows(Dimension::TIME, "time", vec![
            ("s", "second", Number::from_i64(1), "sec|secs"),
            ("ms", "millisecond", Number::decimal(1, -3), ""),
            ("us", "microsecond", Number::decimal(1, -6), "μs"),
            ("min", "minute", Number::from_i64(60), "mins"),
            ("h", "hour", Number::from_i64(3600), "hr|hrs"),
            ("d", "day", Number::from_i64(86_400), ""),
            ("wk", "week", Number::from_i64(604_800), ""),
            // Julian year, the astronomical convention
            ("yr", "year", Number::from_i64(31_557_600), "y"),
        ]);
    }

    fn register_temperature_units(&mut self) {
        // K = C + 273.15
        // K = F * 5/9 + 459.67 * 5/9
        // K = R * 5/9
        let five_ninths = Number::from_ratio(5, 9);
        let units = [
            Unit::new("K", "kelvin", Dimension::TEMPERATURE, Number::from_i64(1), "temperature"),
            Unit::with_offset(
                "degC",
                "degree Celsius",
                Dimension::TEMPERATURE,
                Number::from_i64(1),
                Number::decimal(27315, -2),
                "temperature",
            ),
            Unit::with_offset(
                "degF",
                "degree Fahrenheit",
                Dimension::TEMPERATURE,
                five_ninths.clone(),
                Number::from_ratio(229_835, 900),
                "temperature",
            ),
            Unit::new("degR", "degree Rankine", Dimension::TEMPERATURE, five_ninths, "temperature"),
        ];
        for unit in units {
            self.register(unit);
        }

        for (alias, symbol) in [
            ("C", "degC"), ("°C", "degC"), ("celsius", "degC"), ("degrees C", "degC"),
            ("F", "degF"), ("°F", "degF"), ("fahrenheit", "degF"), ("degrees F", "degF"),
            ("R", "degR"), ("°R", "degR"), ("rankine", "degR"),
            ("degrees celsius", "degC"), ("degrees fahrenheit", "degF"), ("degrees rankine", "degR"),
        ] {
            self.alias(alias, symbol);
        }
    }

    fn register_base_units(&mut self) {
        self.register_rows(Dimension::CURRENT, "current", vec![
            ("A", "ampere", Number::from_i64(1), "amp|amps"),
            ("mA", "milliampere", Number::decimal(1, -3), ""),
        ]);
        self.register_rows(Dimension::AMOUNT, "amount", vec![
            ("mol", "mole", Number::from_i64(1), ""),
            ("mmol", "millimole", Number::decimal(1, -3), ""),
        ]);
        self.register_rows(Dimension::LUMINOSITY, "luminosity", vec![
            ("cd", "candela", Number::from_i64(1), ""),
        ]);
    }

    fn register_area_units(&mut self) {
        self.register_rows(Dimension::AREA, "area", vec![
            ("m2", "square meter", Number::from_i64(1), "m²|sqm"),
            ("km2", "square kilometer", Number::from_i64(1_000_000), "km²"),
            ("cm2", "square centimeter", Number::decimal(1, -4), "cm²"),
            ("ha", "hectare", Number::from_i64(10_000), ""),
            ("ac", "acre", Number::decimal(40468564224, -7), ""),
            ("ft2", "square foot", Number::decimal(9290304, -8), "ft²|sqft|square feet"),
            ("in2", "square inch", Number::decimal(64516, -8), "in²|square inches"),
            ("yd2", "square yard", Number::decimal(83612736, -8), "yd²"),
            ("mi2", "square mile", Number::decimal(2589988110336, -6), "mi²"),
        ]);
    }

    fn register_volume_units(&mut self) {
        self.register_rows(Dimension::VOLUME, "volume", vec![
            ("m3", "cubic meter", Number::from_i64(1), "m³"),
            ("L", "liter", Number::decimal(1, -3), "l|litre|litres"),
            ("dL", "deciliter", Number::decimal(1, -4), "dl"),
            ("mL", "milliliter", Number::decimal(1, -6), "ml|millilitre|millilitres"),
            ("cm3", "cubic centimeter", Number::decimal(1, -6), "cm³|cc"),
            ("gal", "gallon", Number::decimal(3785411784, -12), ""),
            ("qt", "quart", Number::decimal(946352946, -12), ""),
            ("pt", "pint", Number::decimal(473176473, -12), ""),
            ("cup", "cup", Number::decimal(2365882365, -13), ""),
            ("floz", "fluid ounce", Number::decimal(295735295625, -16), "fl oz"),
            ("tbsp", "tablespoon", Number::decimal(1478676478125, -17), "tbs"),
            ("tsp", "teaspoon", Number::decimal(492892159375, -17), ""),
            ("impgal", "imperial gallon", Number::decimal(454609, -8), ""),
            ("imppt", "imperial pint", Number::decimal(56826125, -11), ""),
            ("ft3", "cubic foot", Number::decimal(28316846592, -12), "ft³|cubic feet"),
            ("in3", "cubic inch", Number::decimal(16387064, -12), "in³|cubic inches"),
        ]);
    }

    fn register_velocity_units(&mut self) {
        self.register_rows(Dimension::VELOCITY, "velocity", vec![
            ("m/s", "meter per second", Number::from_i64(1), "mps"),
            ("km/h", "kilometer per hour", Number::from_ratio(5, 18), "kph|kmh"),
            ("mph", "mile per hour", Number::decimal(44704, -5), "mi/h|miles per hour"),
            ("ft/s", "foot per second", Number::decimal(3048, -4), "fps|feet per second"),
            ("kn", "knot", Number::from_ratio(1852, 3600), "kt"),
        ]);
    }

    fn register_mechanical_units(&mut self) {
        self.register_rows(Dimension::FORCE, "force", vec![
            ("N", "newton", Number::from_i64(1), ""),
            ("kN", "kilonewton", Number::from_i64(1000), ""),
            ("lbf", "pound-force", Number::decimal(44482216152605, -13), ""),
        ]);
        self.register_rows(Dimension::ENERGY, "energy", vec![
            ("J", "joule", Number::from_i64(1), ""),
            ("kJ", "kilojoule", Number::from_i64(1000), ""),
            ("cal", "calorie", Number::decimal(4184, -3), ""),
            ("kcal", "kilocalorie", Number::from_i64(4184), "Cal"),
            ("Wh", "watt hour", Number::from_i64(3600), ""),
            ("kWh", "kilowatt hour", Number::from_i64(3_600_000), ""),
            ("BTU", "British thermal unit", Number::decimal(105505585262, -8), "btu"),
        ]);
        self.register_rows(Dimension::POWER, "power", vec![
            ("W", "watt", Number::from_i64(1), ""),
            ("kW", "kilowatt", Number::from_i64(1000), ""),
            ("hp", "horsepower", Number::decimal(745699872, -6), ""),
        ]);
        self.register_rows(Dimension::PRESSURE, "pressure", vec![
            ("Pa", "pascal", Number::from_i64(1), ""),
            ("kPa", "kilopascal", Number::from_i64(1000), ""),
            ("hPa", "hectopascal", Number::from_i64(100), ""),
            ("bar", "bar", Number::from_i64(100_000), ""),
            ("atm", "atmosphere", Number::from_i64(101_325), ""),
            ("psi", "pound per square inch", Number::decimal(6894757293168, -9), "pounds per square inch"),
            ("mmHg", "millimeter of mercury", Number::decimal(133322387415, -9), ""),
        ]);
        self.register_rows(Dimension::FREQUENCY, "frequency", vec![
            ("Hz", "hertz", Number::from_i64(1), ""),
            ("kHz", "kilohertz", Number::from_i64(1000), ""),
            ("rpm", "revolution per minute", Number::from_ratio(1, 60), "revolutions per minute"),
        ]);
    }

    fn register_angle_units(&mut self) {
        // Angles are dimensionless; the category keeps them apart from pure numbers
        self.register_rows(Dimension::DIMENSIONLESS, "angle", vec![
            ("rad", "radian", Number::from_i64(1), ""),
            ("deg", "degree", Number::decimal(17453292519943295, -18), "°"),
            ("turn", "turn", Number::decimal(6283185307179586, -15), "rev|revolution"),
        ]);
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}
