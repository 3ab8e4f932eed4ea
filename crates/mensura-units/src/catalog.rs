//! Built-in unit table.
//!
//! One row per canonical unit: its alias spellings, quantity category,
//! and the affine mapping to the category base unit
//! (`base = value * scale + offset`). All aliases are lower-case; lookup
//! folds case before probing the table.
//!
//! Base units per category: m, kg, s, K, A, V, ohm, l, Pa, N, J, W.

use crate::Quantity;

/// A canonical unit with its alias spellings and base-unit mapping.
#[derive(Debug, Clone, Copy)]
pub struct UnitEntry {
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub quantity: Quantity,
    pub scale: f64,
    pub offset: f64,
}

/// Degrees Fahrenheit to Kelvin: K = (F + 459.67) * 5/9.
const FAHRENHEIT_SCALE: f64 = 5.0 / 9.0;
const FAHRENHEIT_OFFSET: f64 = 459.67 * 5.0 / 9.0;

macro_rules! unit {
    ($canonical:literal, $aliases:expr, $quantity:ident, $scale:expr) => {
        unit!($canonical, $aliases, $quantity, $scale, 0.0)
    };
    ($canonical:literal, $aliases:expr, $quantity:ident, $scale:expr, $offset:expr) => {
        UnitEntry {
            canonical: $canonical,
            aliases: &$aliases,
            quantity: Quantity::$quantity,
            scale: $scale,
            offset: $offset,
        }
    };
}

/// The full built-in catalog.
pub const UNIT_TABLE: &[UnitEntry] = &[
    // Length (base: meter)
    unit!("m", ["m", "meter", "metre", "meters", "metres"], Length, 1.0),
    unit!(
        "km",
        ["km", "kilometer", "kilometre", "kilometers", "kilometres"],
        Length,
        1000.0
    ),
    unit!("cm", ["cm", "centimeter", "centimetre"], Length, 0.01),
    unit!("mm", ["mm", "millimeter", "millimetre"], Length, 0.001),
    unit!("mi", ["mi", "mile", "miles"], Length, 1609.344),
    unit!("yd", ["yd", "yard", "yards"], Length, 0.9144),
    unit!("ft", ["ft", "foot", "feet"], Length, 0.3048),
    unit!("in", ["in", "inch", "inches"], Length, 0.0254),
    // Mass (base: kilogram)
    unit!("kg", ["kg", "kilogram", "kilograms"], Mass, 1.0),
    unit!("g", ["g", "gram", "grams"], Mass, 0.001),
    unit!("mg", ["mg", "milligram", "milligrams"], Mass, 1.0e-6),
    unit!("t", ["t", "tonne", "tonnes", "ton"], Mass, 1000.0),
    unit!("lb", ["lb", "lbs", "pound", "pounds"], Mass, 0.453_592_37),
    unit!("oz", ["oz", "ounce", "ounces"], Mass, 0.028_349_523_125),
    // Duration (base: second)
    unit!("s", ["s", "sec", "secs", "second", "seconds"], Duration, 1.0),
    unit!(
        "ms",
        ["ms", "millisecond", "milliseconds"],
        Duration,
        0.001
    ),
    unit!("min", ["min", "mins", "minute", "minutes"], Duration, 60.0),
    unit!("h", ["h", "hr", "hrs", "hour", "hours"], Duration, 3600.0),
    unit!("d", ["d", "day", "days"], Duration, 86_400.0),
    // Temperature (base: kelvin); Celsius and Fahrenheit are affine
    unit!("k", ["k", "kelvin"], Temperature, 1.0),
    unit!("c", ["c", "celsius", "degc"], Temperature, 1.0, 273.15),
    unit!(
        "f",
        ["f", "fahrenheit", "degf"],
        Temperature,
        FAHRENHEIT_SCALE,
        FAHRENHEIT_OFFSET
    ),
    // Electric current (base: ampere)
    unit!("a", ["a", "amp", "ampere", "amperes"], ElectricCurrent, 1.0),
    unit!(
        "ma",
        ["ma", "milliamp", "milliampere"],
        ElectricCurrent,
        0.001
    ),
    // Electric potential (base: volt)
    unit!("v", ["v", "volt", "volts"], ElectricPotential, 1.0),
    unit!(
        "mv",
        ["mv", "millivolt", "millivolts"],
        ElectricPotential,
        0.001
    ),
    unit!(
        "kv",
        ["kv", "kilovolt", "kilovolts"],
        ElectricPotential,
        1000.0
    ),
    // Electric resistance (base: ohm)
    unit!("ohm", ["ohm", "ohms"], ElectricResistance, 1.0),
    unit!(
        "kohm",
        ["kohm", "kiloohm", "kiloohms"],
        ElectricResistance,
        1000.0
    ),
    unit!(
        "mohm",
        ["mohm", "megaohm", "megaohms"],
        ElectricResistance,
        1.0e6
    ),
    // Volume (base: liter)
    unit!("l", ["l", "liter", "litre", "liters", "litres"], Volume, 1.0),
    unit!(
        "ml",
        ["ml", "milliliter", "millilitre"],
        Volume,
        0.001
    ),
    unit!("m3", ["m3", "cbm"], Volume, 1000.0),
    unit!("gal", ["gal", "gallon", "gallons"], Volume, 3.785_411_784),
    // Pressure (base: pascal)
    unit!("pa", ["pa", "pascal", "pascals"], Pressure, 1.0),
    unit!("hpa", ["hpa", "hectopascal"], Pressure, 100.0),
    unit!("kpa", ["kpa", "kilopascal"], Pressure, 1000.0),
    unit!("mpa", ["mpa", "megapascal"], Pressure, 1.0e6),
    unit!("bar", ["bar"], Pressure, 1.0e5),
    unit!("mbar", ["mbar", "millibar"], Pressure, 100.0),
    unit!("psi", ["psi"], Pressure, 6894.757_293_168),
    unit!("atm", ["atm"], Pressure, 101_325.0),
    unit!("mmhg", ["mmhg", "torr"], Pressure, 133.322_387_415),
    // Force (base: newton)
    unit!("n", ["n", "newton", "newtons"], Force, 1.0),
    unit!("kn", ["kn", "kilonewton", "kilonewtons"], Force, 1000.0),
    unit!("lbf", ["lbf"], Force, 4.448_221_615_260_5),
    // Energy (base: joule)
    unit!("j", ["j", "joule", "joules"], Energy, 1.0),
    unit!("kj", ["kj", "kilojoule", "kilojoules"], Energy, 1000.0),
    unit!("mj", ["mj", "megajoule", "megajoules"], Energy, 1.0e6),
    unit!("wh", ["wh"], Energy, 3600.0),
    unit!("kwh", ["kwh"], Energy, 3.6e6),
    unit!("cal", ["cal", "calorie", "calories"], Energy, 4.184),
    unit!(
        "kcal",
        ["kcal", "kilocalorie", "kilocalories"],
        Energy,
        4184.0
    ),
    // Power (base: watt)
    unit!("w", ["w", "watt", "watts"], Power, 1.0),
    unit!("kw", ["kw", "kilowatt", "kilowatts"], Power, 1000.0),
    unit!("mw", ["mw", "megawatt", "megawatts"], Power, 1.0e6),
    unit!("hp", ["hp", "horsepower"], Power, 745.699_871_582_270_2),
];
