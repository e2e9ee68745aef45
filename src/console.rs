//! Interactive acquisition of an array from a console.
//!
//! The session prompts for an array size, allocates the array, prompts for
//! each element and prints the mean. Invalid input is reported on the error
//! stream and prompted for again. The session only ends early if the input
//! stream ends, which surfaces as [`EndOfInput`].

use crate::array::NumericArray;
use crate::parse::{parse_double, parse_size};
use crate::stats::calculate_mean;
use crate::utils::check_num;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// The input stream ended before the session completed.
#[derive(Debug, thiserror::Error)]
#[error("unexpected end of input")]
pub struct EndOfInput;

/// Check whether `error` was caused by the input stream ending.
pub fn is_end_of_input(error: &anyhow::Error) -> bool {
    error.chain().any(|cause| cause.is::<EndOfInput>())
}

pub struct Console<R, O, E> {
    input: R,
    output: O,
    errors: E,
}

impl<R: BufRead, O: Write, E: Write> Console<R, O, E> {
    pub fn new(input: R, output: O, errors: E) -> Self {
        Self {
            input,
            output,
            errors,
        }
    }

    pub fn into_parts(self) -> (R, O, E) {
        (self.input, self.output, self.errors)
    }

    /// Write `msg` to the output stream and read one line of input.
    ///
    /// The line terminator is stripped. Bytes that are not valid UTF-8 are
    /// replaced with `U+FFFD`, so such a line never parses as a number.
    ///
    /// # Errors
    /// Returns [`EndOfInput`] if the input stream is exhausted, or an I/O
    /// error if either stream fails.
    pub fn prompt(&mut self, msg: &str) -> Result<String> {
        self.output
            .write_all(msg.as_bytes())
            .context("failed to write prompt")?;
        self.output
            .flush()
            .context("failed to flush output stream")?;

        let mut bytes = Vec::new();
        let n_bytes = self
            .input
            .read_until(b'\n', &mut bytes)
            .context("failed to read input stream")?;
        if n_bytes == 0 {
            return Err(EndOfInput.into());
        }

        if bytes.ends_with(b"\n") {
            bytes.pop();
            if bytes.ends_with(b"\r") {
                bytes.pop();
            }
        }
        let line = match String::from_utf8(bytes) {
            Ok(line) => line,
            Err(error) => {
                log::debug!("input line is not valid UTF-8: {error}");
                String::from_utf8_lossy(error.as_bytes()).into_owned()
            }
        };
        Ok(line)
    }

    /// Prompt for a positive array size until one is given.
    pub fn read_size(&mut self) -> Result<usize> {
        loop {
            let line = self.prompt("Array size: ")?;
            let size = parse_size(&line, true)
                .with_context(|| format!("failed to parse {line:?}"))
                .and_then(|size| {
                    check_num(size, 1..)?;
                    Ok(size)
                });
            match size {
                Ok(size) => return Ok(size),
                Err(error) => {
                    log::debug!("invalid array size: {error:#}");
                    self.report("Invalid array size")?;
                }
            }
        }
    }

    /// Read a size and allocate an array of that size with `allocate`.
    ///
    /// A failed allocation is reported and retried with the same size.
    pub fn create_array<T, F>(&mut self, mut allocate: F) -> Result<NumericArray<T>>
    where
        F: FnMut(usize) -> Result<NumericArray<T>>,
    {
        let size = self.read_size()?;
        loop {
            match allocate(size) {
                Ok(array) => {
                    log::debug!("allocated array of {size} elements");
                    return Ok(array);
                }
                Err(error) => {
                    log::debug!("{error:#}");
                    self.report("Unable to allocate array")?;
                }
            }
        }
    }

    pub fn read_elements(&mut self, array: &mut NumericArray<f64>) -> Result<()> {
        for (idx, ele) in array.iter_mut().enumerate() {
            *ele = self
                .read_element(idx)
                .with_context(|| format!("failed to read element {}", idx + 1))?;
        }
        Ok(())
    }

    fn read_element(&mut self, idx: usize) -> Result<f64> {
        let msg = format!("Element {}: ", idx + 1);
        loop {
            let line = self.prompt(&msg)?;
            match parse_double(&line, true) {
                Some(val) => return Ok(val),
                None => {
                    log::debug!("invalid element input {line:?}");
                    self.report("Invalid input")?;
                }
            }
        }
    }

    pub fn print_mean(&mut self, mean: f64) -> Result<()> {
        writeln!(self.output, "Mean: {mean}").context("failed to write mean")?;
        self.output
            .flush()
            .context("failed to flush output stream")?;
        Ok(())
    }

    pub fn run_session<F>(&mut self, allocate: F) -> Result<f64>
    where
        F: FnMut(usize) -> Result<NumericArray<f64>>,
    {
        let mut array = self
            .create_array(allocate)
            .context("failed to create array")?;
        self.read_elements(&mut array)
            .context("failed to read elements")?;

        let mean = calculate_mean(array.as_slice(), 0.0);
        log::debug!("mean of {} elements is {mean}", array.len());

        self.print_mean(mean)?;
        Ok(mean)
    }

    fn report(&mut self, msg: &str) -> Result<()> {
        writeln!(self.errors, "{msg}").context("failed to write error stream")
    }
}
