//! Reporting into a test harness
//!
//! [`side_by_side`] logs a verdict and a two-column rendering of expected and
//! actual values into a [`TestReporter`]. [`assert_deep_eq!`](crate::assert_deep_eq)
//! is the panicking form for plain `#[test]` functions.

use crate::diff::{difference, Side};
use crate::equal::equal;
use crate::errors::{DeepEqError, Result};
use crate::options::RenderOptions;
use crate::render::{compose, Printer};
use crate::value::Handle;
use crate::{log_op_end, log_op_error, log_op_start};

/// Sink for test verdicts and diagnostic output
pub trait TestReporter {
    /// Record a failure; the test continues
    fn fail(&mut self, message: &str);

    fn log(&mut self, text: &str);
}

/// Report whether `want` and `got` are deep-equal, followed by a
/// side-by-side rendering with the differences highlighted
///
/// Returns the verdict.
///
/// # Errors
///
/// - `InvalidHandle`: either handle is absent; the verdict is still
///   reported before the error is returned
/// - `UnsupportedKind`: the values differ inside a function or channel
pub fn side_by_side<'a>(
    reporter: &mut dyn TestReporter,
    what: &str,
    want: impl Into<Handle<'a>>,
    got: impl Into<Handle<'a>>,
) -> Result<bool> {
    side_by_side_with(reporter, what, want, got, &RenderOptions::default())
}

/// [`side_by_side`] with explicit rendering options
///
/// # Errors
///
/// Same as [`side_by_side`].
pub fn side_by_side_with<'a>(
    reporter: &mut dyn TestReporter,
    what: &str,
    want: impl Into<Handle<'a>>,
    got: impl Into<Handle<'a>>,
    options: &RenderOptions,
) -> Result<bool> {
    let (want, got) = (want.into(), got.into());
    log_op_start!("side_by_side", what = what);
    let start = std::time::Instant::now();

    let matched = equal(want, got);
    if matched {
        reporter.log(&format!("a match for expected and actual values of {}", what));
    } else {
        reporter.fail(&format!("mismatched expected and actual values of {}", what));
    }

    let text = render_report(want, got, options).map_err(|e| {
        log_op_error!(
            "side_by_side",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            what = what
        );
        e
    })?;
    reporter.log(&text);

    log_op_end!(
        "side_by_side",
        duration_ms = start.elapsed().as_millis() as u64,
        what = what,
        equal = matched
    );
    Ok(matched)
}

/// Side-by-side text for two values, whether or not they differ
///
/// # Errors
///
/// Same as [`difference`].
pub fn render_report<'a>(
    want: impl Into<Handle<'a>>,
    got: impl Into<Handle<'a>>,
    options: &RenderOptions,
) -> Result<String> {
    let (want, got) = (want.into(), got.into());
    let diff = difference(want, got)?;
    let left = want
        .get()
        .ok_or(DeepEqError::InvalidHandle { side: Side::Left })?;
    let right = got
        .get()
        .ok_or(DeepEqError::InvalidHandle { side: Side::Right })?;

    let left = Printer::new(Side::Left).render(left, diff.as_ref(), options.show_root_type);
    let right = Printer::new(Side::Right).render(right, diff.as_ref(), options.show_root_type);
    Ok(compose(&left, &right, options))
}

/// `None` when the values are deep-equal, the side-by-side report otherwise
///
/// # Errors
///
/// Same as [`difference`].
pub fn mismatch_report<'a>(
    want: impl Into<Handle<'a>>,
    got: impl Into<Handle<'a>>,
) -> Result<Option<String>> {
    let (want, got) = (want.into(), got.into());
    if equal(want, got) {
        return Ok(None);
    }
    render_report(want, got, &RenderOptions::default()).map(Some)
}

/// Assert that two values are deep-equal, panicking with a side-by-side
/// report otherwise
///
/// ```
/// use deepeq_core::assert_deep_eq;
///
/// assert_deep_eq!(vec![1, 2, 3], vec![1, 2, 3]);
/// ```
///
/// ```should_panic
/// use deepeq_core::assert_deep_eq;
///
/// assert_deep_eq!(vec![1, 2, 3], vec![1, 3]);
/// ```
#[macro_export]
macro_rules! assert_deep_eq {
    ($want:expr, $got:expr $(,)?) => {
        match $crate::report::mismatch_report(&$want, &$got) {
            Ok(None) => {}
            Ok(Some(report)) => panic!("deep equality assertion failed\n{}", report),
            Err(err) => panic!("deep equality assertion could not run: {}", err),
        }
    };
}
