#![allow(non_snake_case)]
#![allow(non_camel_case_types)]

use std::fmt;

//Error handling crates
use anyhow::{Result, Context, bail};

//Serializing/Deserializing crate
use serde::*;

//Logging
use log::warn;

//Parallelization
use rayon::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};

//Randomness
use rand::Rng;
use rand_distr::{Normal, Distribution};

//Arrays
use ndarray::prelude::*;

//Math
use std::f64::consts::PI;

//Load internal modules
pub mod consts;
pub mod structs;
pub mod enums;
pub mod errors;
pub mod geometry;
pub mod field;
pub mod particle;
pub mod mesh;
pub mod tracker;
pub mod radiograph;
pub mod input;
pub mod output;

pub use crate::consts::*;
pub use crate::structs::Vector;
pub use crate::enums::*;
pub use crate::errors::{GeometryError, ValidationError, StateError, TrackerError};
pub use crate::geometry::GeometryFrame;
pub use crate::field::{FieldGrid, FieldSample, CartesianFieldGrid};
pub use crate::particle::{Species, Particle};
pub use crate::mesh::WireMesh;
pub use crate::tracker::{Tracker, TrackerOptions, RunSummary};
pub use crate::radiograph::{synthetic_radiograph, Radiograph};
pub use crate::input::InputFile;
pub use crate::output::OutputUnits;
