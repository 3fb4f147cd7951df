//! DraftEngine curve kernel: analytic curves, evaluation, and measures.
//!
//! This crate is the "curve oracle" behind the drawing classifier: every
//! numeric query (evaluation, arc length, curvature, approximation) goes
//! through the [`Curve`] trait so higher layers can be exercised with
//! deterministic analytic curves.

pub mod basis;
pub mod curve;
pub mod fit;
pub mod measure;
pub mod tessellate;

pub use curve::{BezierCurve, BSplineCurve, Circle, Curve, CurveGeom, CurveKind, Ellipse, Line};
