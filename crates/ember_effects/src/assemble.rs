//! Worker kernel assembly.
//!
//! A scene's shader module is the queue kernel, the effect prelude, the
//! effect's job and the generic worker stitched together. The module must
//! expose `enqueue_main` and `worker_main`; a richer assembler (job
//! renaming, multi-job dispatch tables) can be plugged in through
//! [`KernelAssembler`].

use crate::error::{AssetError, AssetResult};
use crate::loader::LoadedJob;

/// Entry point of the enqueue pass.
pub const ENQUEUE_ENTRY: &str = "enqueue_main";
/// Entry point of the worker pass.
pub const WORKER_ENTRY: &str = "worker_main";
/// Function every job source must define.
pub const JOB_ENTRY: &str = "process_job";

/// Pieces of one worker kernel.
#[derive(Debug, Clone, Copy)]
pub struct KernelParts<'a> {
    /// Lock-free queue kernel.
    pub queue_wgsl: &'a str,
    /// Generic worker kernel.
    pub worker_wgsl: &'a str,
    /// Effect prelude.
    pub prelude_wgsl: &'a str,
    /// Jobs linked into the module.
    pub jobs: &'a [LoadedJob],
}

/// Turns [`KernelParts`] into one WGSL module.
pub trait KernelAssembler {
    /// Builds the module source.
    ///
    /// # Errors
    ///
    /// Implementation-defined; [`AssetError::MissingEntryPoint`] for jobs
    /// without `process_job`.
    fn assemble(&self, parts: &KernelParts<'_>) -> AssetResult<String>;
}

/// Concatenates the parts in dependency order with labelled separators.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConcatAssembler;

impl KernelAssembler for ConcatAssembler {
    fn assemble(&self, parts: &KernelParts<'_>) -> AssetResult<String> {
        for job in parts.jobs {
            if !defines_fn(&job.wgsl, JOB_ENTRY) {
                return Err(AssetError::MissingEntryPoint { label: job.label.clone() });
            }
        }

        let mut out = String::with_capacity(
            parts.queue_wgsl.len()
                + parts.prelude_wgsl.len()
                + parts.worker_wgsl.len()
                + parts.jobs.iter().map(|j| j.wgsl.len()).sum::<usize>()
                + 256,
        );
        push_section(&mut out, "queue", parts.queue_wgsl);
        push_section(&mut out, "prelude", parts.prelude_wgsl);
        for job in parts.jobs {
            push_section(&mut out, &job.source_name, &job.wgsl);
        }
        push_section(&mut out, "worker", parts.worker_wgsl);
        Ok(out)
    }
}

fn push_section(out: &mut String, name: &str, body: &str) {
    out.push_str("// ---- ");
    out.push_str(name);
    out.push_str(" ----\n");
    out.push_str(body);
    if !body.ends_with('\n') {
        out.push('\n');
    }
}

/// True when `source` contains `fn <name>` as a whole word.
#[must_use]
pub fn defines_fn(source: &str, name: &str) -> bool {
    let is_ident = |c: char| c.is_ascii_alphanumeric() || c == '_';
    let mut rest = source;
    while let Some(pos) = rest.find("fn") {
        let before_ok = rest[..pos].chars().next_back().map_or(true, |c| !is_ident(c));
        let after = &rest[pos + 2..];
        let trimmed = after.trim_start();
        if before_ok && trimmed.len() < after.len() && trimmed.starts_with(name) {
            let tail = &trimmed[name.len()..];
            if tail.chars().next().map_or(true, |c| !is_ident(c)) {
                return true;
            }
        }
        rest = after;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(label: &str, wgsl: &str) -> LoadedJob {
        LoadedJob { label: label.into(), source_name: label.into(), wgsl: wgsl.into() }
    }

    #[test]
    fn test_defines_fn() {
        assert!(defines_fn("fn process_job(i: u32) {}", "process_job"));
        assert!(defines_fn("x;\nfn  process_job (i: u32) {}", "process_job"));
        assert!(!defines_fn("fn process_jobs() {}", "process_job"));
        assert!(!defines_fn("defn process_job() {}", "process_job"));
        assert!(!defines_fn("fnprocess_job() {}", "process_job"));
        assert!(!defines_fn("// nothing here", "process_job"));
    }

    #[test]
    fn test_concat_order() {
        let jobs = [job("particles.rain.update", "fn process_job() {}")];
        let module = ConcatAssembler
            .assemble(&KernelParts {
                queue_wgsl: "// Q",
                worker_wgsl: "// W",
                prelude_wgsl: "// P",
                jobs: &jobs,
            })
            .unwrap();

        let q = module.find("// Q").unwrap();
        let p = module.find("// P").unwrap();
        let j = module.find("particles.rain.update").unwrap();
        let w = module.find("// W").unwrap();
        assert!(q < p && p < j && j < w);
    }

    #[test]
    fn test_job_without_entry_point() {
        let jobs = [job("particles.snow.update", "fn main() {}")];
        let err = ConcatAssembler
            .assemble(&KernelParts { queue_wgsl: "", worker_wgsl: "", prelude_wgsl: "", jobs: &jobs })
            .unwrap_err();
        assert!(matches!(err, AssetError::MissingEntryPoint { label } if label == "particles.snow.update"));
    }
}
