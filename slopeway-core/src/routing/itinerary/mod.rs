//! Conversion of routing results to interchange formats

mod to_geojson;
