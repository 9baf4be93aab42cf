//Physical constants
///Fundamental charge in Coulombs.
pub const Q: f64 = 1.602176634E-19;
/// One electron-volt in Joules.
pub const EV: f64 = Q;
/// One MeV in Joules.
pub const MEV: f64 = 1E6*EV;
/// One atomic mass unit in kilograms.
pub const AMU: f64 = 1.66053906660E-27;
/// One micron in meters.
pub const MICRON: f64 = 1E-6;
/// One millimeter in meters.
pub const MM: f64 = 1E-3;
/// One centimeter in meters.
pub const CM: f64 = 1E-2;
/// Electron mass in kilograms.
pub const ME: f64 = 9.1093837015E-31;
/// Proton mass in kilograms.
pub const MP: f64 = 1.67262192369E-27;
/// Alpha particle mass in kilograms.
pub const MALPHA: f64 = 6.6446573357E-27;
/// Speed of light in meters/second.
pub const C: f64 = 299792458.;
