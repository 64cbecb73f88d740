//! End-to-end tests through the public macros
//!
//! These tests rely on real call-site resolution: `cargo test` runs with the
//! package root as working directory, so `file!()` paths are readable.
//! Every macro call below must start its own line and stay on it, so
//! options and long expressions are bound to locals to keep each call under
//! rustfmt's call width. A call behind `let x =` is deliberately suppressed.

#![cfg(feature = "ndarray")]

use ndarray::{Array, Array2, Array4};
use pshape::{pshape_to, OutputFormat, PrintOptions, ProbeKind};

// ============================================================================
// HELPERS
// ============================================================================

/// Deterministic values in [0, 1)
fn unit_values(shape: (usize, usize, usize, usize)) -> Array4<f64> {
    let mut state: u64 = 0x2545_F491_4F6C_DD1D ^ (shape.3 as u64);
    Array4::from_shape_simple_fn(shape, || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state >> 11) as f64 / (1u64 << 53) as f64
    })
}

/// `0..rows * cols` as int64, row-major
fn grid(rows: usize, cols: usize) -> Array2<i64> {
    Array::from_iter(0..(rows * cols) as i64)
        .into_shape_with_order((rows, cols))
        .unwrap()
}

fn lines(out: &[u8]) -> Vec<String> {
    String::from_utf8(out.to_vec())
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

fn has_decimals(token: &str, decimals: usize) -> bool {
    token
        .split_once('.')
        .is_some_and(|(int, frac)| !int.is_empty() && frac.len() == decimals)
}

// ============================================================================
// CALL-SITE NAMES
// ============================================================================

#[test]
fn e2e_three_named_arrays() {
    let cool_arr1 = unit_values((123, 4, 2, 1));
    let cool_arr2 = unit_values((123, 4, 2, 2));
    let cool_arr3 = unit_values((123, 4, 2, 3));

    let options = PrintOptions::default();

    let mut out: Vec<u8> = Vec::new();
    pshape_to!(&mut out, options, cool_arr1, cool_arr2, cool_arr3);

    let lines = lines(&out);
    assert_eq!(lines.len(), 4, "header plus three rows: {lines:?}");
    assert!(lines[0].starts_with("name      shape          dtype   min"));

    for (idx, line) in lines[1..].iter().enumerate() {
        let name = format!("cool_arr{}", idx + 1);
        assert!(line.starts_with(&format!("{name} (123, 4, 2, {})", idx + 1)), "{line}");

        let tokens: Vec<&str> = line.split_whitespace().collect();
        assert_eq!(tokens.len(), 9, "{line}");
        assert_eq!(tokens[5], "float64");
        for stat in &tokens[6..] {
            assert!(has_decimals(stat, 4), "{stat}");
        }
    }
}

#[test]
fn e2e_expression_names_are_aligned() {
    let cool_arr1 = unit_values((123, 4, 2, 1));
    let cool_arr3 = unit_values((123, 4, 2, 3));

    let options = PrintOptions::default().with_header(false);

    let mut out: Vec<u8> = Vec::new();
    pshape_to!(&mut out, options, cool_arr1, grid(3, 4), cool_arr3);

    let lines = lines(&out);
    assert_eq!(lines.len(), 3);

    assert!(lines[0].starts_with("cool_arr1  (123, 4, 2, 1)"), "{}", lines[0]);
    let expected = "grid(3, 4) (3, 4)         int64   0.0000 5.5000 11.0000";
    assert!(lines[1].starts_with(expected), "{}", lines[1]);
    assert!(lines[2].starts_with("cool_arr3  "));

    // Every row has the same column boundaries
    let widths: Vec<usize> = lines.iter().map(|l| l.chars().count()).collect();
    assert!(widths.windows(2).all(|w| w[0] == w[1]), "{widths:?}");
}

#[test]
fn e2e_integer_mean_is_not_truncated() {
    let counts = Array2::from_shape_vec((1, 2), vec![1u32, 2]).unwrap();
    let options = PrintOptions::default()
        .with_header(false)
        .with_probes(vec![ProbeKind::Mean]);

    let mut out: Vec<u8> = Vec::new();
    pshape_to!(&mut out, options, counts);

    assert_eq!(lines(&out), vec!["counts 1.5000"]);
}

#[test]
fn e2e_mixed_std_and_ndarray_without_device_column() {
    let plain = vec![1.0f32, 2.0, 3.0];
    let grid = Array2::<f64>::ones((2, 2));
    let options = PrintOptions::default();

    let mut out: Vec<u8> = Vec::new();
    pshape_to!(&mut out, options, plain, grid);

    let lines = lines(&out);
    let header: Vec<&str> = lines[0].split_whitespace().collect();
    assert_eq!(header, vec!["name", "shape", "dtype", "min", "mean", "max"]);
    assert!(lines[1].starts_with("plain (3,)   float32"));
    assert!(lines[2].starts_with("grid  (2, 2) float64"));
}

#[test]
fn e2e_nested_call_prints_nothing() {
    let a = vec![1.0f64];
    let options = PrintOptions::default();
    let mut out: Vec<u8> = Vec::new();

    let _ = pshape_to!(&mut out, options, a);

    assert!(out.is_empty());
}

#[test]
fn e2e_repeated_calls_are_identical() {
    let samples = unit_values((4, 3, 2, 1));
    let mut first: Vec<u8> = Vec::new();
    let mut second: Vec<u8> = Vec::new();

    for out in [&mut first, &mut second] {
        let options = PrintOptions::default();
        pshape_to!(out, options, samples);
    }

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn e2e_json_format() {
    let weights = vec![0.5f64, 1.5];
    let options = PrintOptions::default().with_format(OutputFormat::Json);

    let mut out: Vec<u8> = Vec::new();
    pshape_to!(&mut out, options, weights);

    let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(parsed["rows"][0][0], "weights");
    assert_eq!(parsed["rows"][0][3], "0.5000");
    assert_eq!(parsed["columns"][1], "shape");
}

#[test]
fn e2e_precision_option() {
    let ratio = vec![0.50905f64];
    let options = PrintOptions::default()
        .with_precision(2)
        .with_header(false);

    let mut out: Vec<u8> = Vec::new();
    pshape_to!(&mut out, options, ratio);

    assert_eq!(lines(&out), vec!["ratio (1,) float64 0.51 0.51 0.51"]);
}

// ============================================================================
// CALL LAYOUT
// ============================================================================

/// rustfmt's default `fn_call_width`; wider argument lists get wrapped
const RUSTFMT_CALL_WIDTH: usize = 60;

#[test]
fn e2e_macro_calls_survive_rustfmt() {
    let source = include_str!("end_to_end.rs");
    let calls: Vec<(&str, &str)> = source
        .lines()
        .filter_map(|line| {
            let trimmed = line.trim_start();
            let call = trimmed.strip_prefix("let _ = ").unwrap_or(trimmed);
            call.starts_with("pshape_to!(").then_some((line, call))
        })
        .collect();
    assert!(calls.len() >= 8, "{calls:?}");

    for (line, call) in calls {
        let args = pshape::callsite::extract_call_args(call, "pshape_to!").unwrap();
        assert!(args.chars().count() <= RUSTFMT_CALL_WIDTH, "{line}");
        assert!(line.chars().count() <= 100, "{line}");
    }
}
