//! Forces dynamic linking of `animpak_internal`, enabled with the `dynamic_linking` feature.

#![allow(unused_imports)]
#[allow(clippy::single_component_path_imports)]
use animpak_internal;
