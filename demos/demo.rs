//! Demo: print a few arrays the way you would while debugging
//!
//! Run from the package root so the call sites can be read back:
//!
//! ```bash
//! cargo run --example demo
//! RUST_LOG=debug cargo run --example demo
//! ```

use ndarray::{Array, Array2, Array4};
use pshape::{pshape, pshape_with, PrintOptions, ProbeKind};
use tracing_subscriber::EnvFilter;

fn ramp(shape: (usize, usize, usize, usize)) -> Array4<f64> {
    let len = (shape.0 * shape.1 * shape.2 * shape.3) as f64;
    let mut i = 0.0;
    Array4::from_shape_simple_fn(shape, || {
        i += 1.0;
        ((i * 7919.0) % len) / len
    })
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Each call fits on one line so its names can be read back
    let arange = Array::from_iter(0i64..10);

    println!(">>> pshape!(arange.view().into_shape_with_order((5, 2, 1)).unwrap())");
    println!();
    pshape!(arange.view().into_shape_with_order((5, 2, 1)).unwrap());
    println!();

    let cube = arange.view().into_shape_with_order((5, 2, 1)).unwrap();

    println!(">>> pshape!(Array2::<f64>::eye(4), cube)");
    println!();
    pshape!(Array2::<f64>::eye(4), cube);
    println!();

    let cool_arr1 = ramp((123, 4, 2, 1));
    let cool_arr2 = ramp((123, 4, 2, 2));
    let cool_arr3 = ramp((123, 4, 2, 3));

    println!(">>> pshape!(cool_arr1, cool_arr2, cool_arr3)");
    println!();
    pshape!(cool_arr1, cool_arr2, cool_arr3);
    println!();

    // Brackets do not nest in name inference, so bind `vec![..]` first
    let bytes = vec![1u8, 2, 3];
    let two_decimals = PrintOptions::default().with_precision(2);

    println!(">>> pshape_with!(two_decimals, cool_arr1, bytes)");
    println!();
    pshape_with!(two_decimals, cool_arr1, bytes);
    println!();

    let shape_only = PrintOptions::default().with_probes(vec![ProbeKind::Shape]);

    println!(">>> pshape_with!(shape_only, cool_arr3)");
    println!();
    pshape_with!(shape_only, cool_arr3);
    println!();

    println!(">>> let _ = pshape!(cool_arr1);  // nested: prints a warning instead");
    let _ = pshape!(cool_arr1);
}
