//! # Constants
//!
//! Per-residue biochemical scales used as classifier features.
//!
//! ## Scales
//! Each scale maps the 20 standard amino acids to a single value:
//!
//! - `Gravy` - hydropathy, [Kyte & Doolittle (1982)](http://web.expasy.org/protscale/pscale/Hphob.Doolittle.html)
//! - `Hydrophobicity` - [Fauchere & Pliska (1983)](https://web.expasy.org/protscale/pscale/Hphob.Fauchere.html)
//! - `Exposure` - surface exposure free energy, Janin (1979), via [cprofiler](http://www.cprofiler.org/help.html)
//! - `Disorder` - disorder propensity, Dunker et al. (2001)
//! - `Bulkiness` - Zimmerman et al. (1968)
//! - `Interface` - interface propensity, Jones & Thornton (1997)
//!
//! Ambiguity codes, gaps and stop symbols are absent from every scale.
//!

use std::collections::HashMap;
use std::sync::OnceLock;
use strum::{Display, EnumIter};

/// The six scales, in the column order the classifier was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Scale {
    Gravy = 0,
    Hydrophobicity = 1,
    Exposure = 2,
    Disorder = 3,
    Bulkiness = 4,
    Interface = 5,
}

impl Scale {
    pub fn to_index(&self) -> usize {
        *self as usize
    }
}

pub const STANDARD_AA: [char; 20] = [
    'A', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'V', 'W',
    'Y',
];

#[rustfmt::skip]
const RESIDUE_SCALES: [(char, [f64; 6]); 20] = [
    //      gravy  hydro   expos  disord  bulky   iface
    ('A', [  1.8,   0.31,   0.3,   1.0,   11.5,  -0.17]),
    ('C', [  2.5,   1.54,   0.9,  -1.0,   13.46,  0.43]),
    ('D', [ -3.5,  -0.77,  -0.6,   0.0,   11.68, -0.38]),
    ('E', [ -3.5,  -0.64,  -0.7,   1.0,   13.57, -0.13]),
    ('F', [  2.8,   1.79,   0.5,  -1.0,   19.8,   0.82]),
    ('G', [ -0.4,   0.0,    0.3,   1.0,    3.4,  -0.07]),
    ('H', [ -3.2,   0.13,  -0.1,   0.0,   13.69,  0.41]),
    ('I', [  4.5,   1.8,    0.7,  -1.0,   21.4,   0.44]),
    ('K', [ -3.9,  -0.99,  -1.8,   1.0,   15.71, -0.36]),
    ('L', [  3.8,   1.7,    0.5,  -1.0,   21.4,   0.4 ]),
    ('M', [  1.9,   1.23,   0.4,   0.0,   16.25,  0.66]),
    ('N', [ -3.5,  -0.6,   -0.5,  -1.0,   12.82,  0.12]),
    ('P', [ -1.6,   0.72,  -0.3,   1.0,   17.43, -0.25]),
    ('Q', [ -3.5,  -0.22,  -0.7,   1.0,   14.45, -0.11]),
    ('R', [ -4.5,  -1.01,  -1.4,   1.0,   14.28,  0.27]),
    ('S', [ -0.8,  -0.04,  -0.1,   1.0,    9.47, -0.33]),
    ('T', [ -0.7,   0.26,  -0.2,   0.0,   15.77, -0.18]),
    ('V', [  4.2,   1.22,   0.6,  -1.0,   21.57,  0.27]),
    ('W', [ -0.9,   2.25,   0.3,  -1.0,   21.67,  0.83]),
    ('Y', [ -1.3,   0.96,  -0.4,  -1.0,   18.03,  0.66]),
];

static PROPERTY_TABLES: OnceLock<HashMap<char, [f64; 6]>> = OnceLock::new();

fn property_tables() -> &'static HashMap<char, [f64; 6]> {
    PROPERTY_TABLES.get_or_init(|| RESIDUE_SCALES.iter().copied().collect())
}

/// All six scale values for a residue, in [`Scale`] order.
///
/// Lowercase codes are normalised; anything outside the 20 standard
/// amino acids returns `None`.
pub fn residue_properties(code: char) -> Option<&'static [f64; 6]> {
    property_tables().get(&code.to_ascii_uppercase())
}

pub fn lookup(scale: Scale, code: char) -> Option<f64> {
    residue_properties(code).map(|values| values[scale.to_index()])
}
