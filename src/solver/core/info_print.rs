use super::{SolveResult, SolveStats, SolverSettings};
use crate::algebra::FloatT;
use crate::io::PrintTarget;
use crate::timers::Timers;
use std::io::Write;
use std::time::Duration;

macro_rules! expformat {
    ($fmt:expr,$val:expr) => {
        if $val.is_finite() {
            _exp_str_reformat(format!($fmt, $val))
        } else {
            format!($fmt, $val)
        }
    };
}

const RULE: &str = "-------------------------------------------------------------";

pub(crate) fn print_banner(out: &mut PrintTarget) -> std::io::Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(
        out,
        "        krylov v{}  -  iterative sparse linear solvers",
        crate::VERSION
    )?;
    writeln!(out, "{RULE}")?;
    std::io::Result::Ok(())
}

pub(crate) fn print_configuration<T: FloatT>(
    out: &mut PrintTarget,
    settings: &SolverSettings<T>,
    n: usize,
    nnz: usize,
    method: &str,
) -> std::io::Result<()> {
    writeln!(out, "\nproblem:")?;
    writeln!(out, "  dimension     = {}", n)?;
    writeln!(out, "  nnz(A)        = {}", nnz)?;
    writeln!(out, "\nsettings:")?;
    writeln!(out, "  method        = {}", method)?;
    writeln!(
        out,
        "  tolerance     = {}",
        expformat!("{:.1e}", settings.tolerance)
    )?;
    writeln!(out, "  max iter      = {}", settings.iteration_limit(n))?;
    writeln!(out, "  precision     = {} bit", _get_precision_string::<T>())?;
    writeln!(out,)?;
    std::io::Result::Ok(())
}

pub(crate) fn print_status_header(out: &mut PrintTarget) -> std::io::Result<()> {
    //print a subheader for the iterations info
    write!(out, " iter    ")?;
    write!(out, "rel. residual   ")?;
    write!(out, "matvecs   ")?;
    write!(out, "precond   ")?;
    writeln!(out,)?;
    writeln!(out, "{RULE}")?;
    out.flush()?;
    std::io::Result::Ok(())
}

pub(crate) fn print_status<T: FloatT>(
    out: &mut PrintTarget,
    stats: &SolveStats<T>,
) -> std::io::Result<()> {
    write!(out, "{:>5}    ", stats.iterations)?;
    write!(out, "{}      ", expformat!("{:8.4e}", stats.residual))?;
    write!(out, "{:>7}   ", stats.mat_vec_multiplies)?;
    write!(out, "{:>7}", stats.preconditioner_solves)?;
    writeln!(out,)?;
    std::io::Result::Ok(())
}

pub(crate) fn print_footer<T: FloatT>(
    out: &mut PrintTarget,
    result: &SolveResult<T>,
    timers: &Timers,
) -> std::io::Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(out, "Terminated with status = {}", result.status)?;
    writeln!(out, "iterations = {}", result.stats.iterations)?;
    writeln!(out, "matrix-vector products = {}", result.stats.mat_vec_multiplies)?;
    writeln!(out, "preconditioner solves = {}", result.stats.preconditioner_solves)?;
    writeln!(
        out,
        "relative residual = {}",
        expformat!("{:.4e}", result.stats.residual)
    )?;
    writeln!(
        out,
        "solve time = {:?}",
        Duration::from_secs_f64(result.solve_time)
    )?;
    timers.print(out)?;
    out.flush()?;
    std::io::Result::Ok(())
}

fn _get_precision_string<T: FloatT>() -> String {
    (::std::mem::size_of::<T>() * 8).to_string()
}

// convert a string in LowerExp display format into one that
// 1) always has a sign after the exponent, and
// 2) has at least two digits in the exponent.

fn _exp_str_reformat(mut thestr: String) -> String {
    let Some(eidx) = thestr.find('e') else {
        return thestr;
    };
    let has_sign = thestr.chars().nth(eidx + 1) == Some('-');

    let has_short_exp = {
        if !has_sign {
            thestr.len() == eidx + 2
        } else {
            thestr.len() == eidx + 3
        }
    };

    let chars = match (has_sign, has_short_exp) {
        (false, true) => "+0",
        (false, false) => "+",
        (true, true) => "0",
        (true, false) => "",
    };

    let shift = if has_sign { 2 } else { 1 };
    thestr.insert_str(eidx + shift, chars);
    thestr
}

#[test]
fn test_exp_str_reformat() {
    assert_eq!(_exp_str_reformat(format!("{:.1e}", 1e-6)), "1.0e-06");
    assert_eq!(_exp_str_reformat(format!("{:.1e}", 2.5e3)), "2.5e+03");
    assert_eq!(_exp_str_reformat(format!("{:.1e}", 1e-12)), "1.0e-12");
    assert_eq!(_exp_str_reformat(format!("{:.1e}", 1e100)), "1.0e+100");
}
