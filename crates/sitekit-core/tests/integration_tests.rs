//! Integration tests for sitekit-core: the real pipeline over an in-memory tree.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use sitekit_adapters::MemoryFilesystem;
use sitekit_core::{
    application::{
        ApplicationError, SiteJob, StyleJob,
        ports::{ChangeBatch, ChangeSource, Filesystem, SiteGenerator, StylePreprocessor},
    },
    prelude::*,
};

const ROOT: &str = "/src/blog";
const OUT: &str = "/src/jto.github.io";

/// Writes a marker CSS file for every job, like lessc would.
#[derive(Clone, Default)]
struct FakeLessc {
    fs: MemoryFilesystem,
    jobs: Arc<Mutex<Vec<StyleJob>>>,
}

impl StylePreprocessor for FakeLessc {
    fn compile(&self, job: &StyleJob) -> SiteKitResult<()> {
        self.jobs.lock().unwrap().push(job.clone());
        self.fs.write_file(&job.destination, "/* css */");
        Ok(())
    }
}

/// Records what the output directory held at the moment it was invoked.
#[derive(Clone)]
struct FakeJekyll {
    fs: MemoryFilesystem,
    fail: bool,
    calls: Arc<Mutex<usize>>,
    seen_before_run: Arc<Mutex<Option<Vec<PathBuf>>>>,
}

impl FakeJekyll {
    fn new(fs: &MemoryFilesystem, fail: bool) -> Self {
        Self {
            fs: fs.clone(),
            fail,
            calls: Arc::default(),
            seen_before_run: Arc::default(),
        }
    }
}

impl SiteGenerator for FakeJekyll {
    fn generate(&self, job: &SiteJob) -> SiteKitResult<()> {
        *self.calls.lock().unwrap() += 1;
        *self.seen_before_run.lock().unwrap() = Some(self.fs.read_dir(&job.destination)?);
        if self.fail {
            return Err(ApplicationError::GeneratorFailed { status: Some(1) }.into());
        }
        self.fs
            .write_file(job.destination.join("index.html"), "<html></html>");
        Ok(())
    }
}

/// Hands out pre-recorded batches, then closes.
struct ScriptedChanges(VecDeque<ChangeBatch>);

impl ChangeSource for ScriptedChanges {
    fn next_batch(&mut self) -> SiteKitResult<Option<ChangeBatch>> {
        Ok(self.0.pop_front())
    }
}

fn layout() -> PathConfig {
    let mut builder = PathConfig::builder()
        .project_root(ROOT)
        .output_dir(OUT)
        .include_path("_assets/less")
        .strict_imports(true)
        .preserve_hidden(true);
    for name in ["main", "blog", "resume"] {
        builder = builder.style(
            format!("_assets/less/{name}.less"),
            format!("assets/css/{name}.css"),
        );
    }
    for group in ["articles", "js", "images", "font", "scala_is_faster_than_java"] {
        builder = builder.copy_group(group, "_assets", [format!("{group}/**")], "assets");
    }
    builder
        .watch_group("styles", ["_assets/**/*.less"], TaskKind::StyleBuild)
        .watch_group("assets", ["_assets/**"], TaskKind::AssetCopy)
        .watch_group(
            "site",
            ["*.html", "*.yml", "_posts/**", "_layouts/**", "_includes/**"],
            TaskKind::SiteBuild,
        )
        .build()
        .unwrap()
}

fn seeded_fs() -> MemoryFilesystem {
    let fs = MemoryFilesystem::new();
    fs.write_file(format!("{ROOT}/_assets/less/main.less"), "@import \"variables\";");
    fs.write_file(format!("{ROOT}/_assets/less/blog.less"), "@import \"variables\";");
    fs.write_file(format!("{ROOT}/_assets/less/resume.less"), "");
    fs.write_file(format!("{ROOT}/_assets/less/variables.less"), "@c: red;");
    for group in ["articles", "js", "images", "font", "scala_is_faster_than_java"] {
        fs.write_file(format!("{ROOT}/_assets/{group}/keep.txt"), group);
    }
    fs.write_file(format!("{ROOT}/_assets/images/x/y.png"), "png");
    fs.write_file(format!("{OUT}/.git/HEAD"), "ref: refs/heads/master");
    fs.write_file(format!("{OUT}/stale.html"), "old");
    fs
}

struct Harness {
    fs: MemoryFilesystem,
    lessc: FakeLessc,
    jekyll: FakeJekyll,
    pipeline: Pipeline,
}

fn harness(generator_fails: bool) -> Harness {
    let fs = seeded_fs();
    let lessc = FakeLessc {
        fs: fs.clone(),
        ..FakeLessc::default()
    };
    let jekyll = FakeJekyll::new(&fs, generator_fails);
    let pipeline = Pipeline::new(
        layout(),
        Arc::new(fs.clone()),
        Arc::new(lessc.clone()),
        Arc::new(jekyll.clone()),
    );
    Harness {
        fs,
        lessc,
        jekyll,
        pipeline,
    }
}

fn css_outputs(fs: &MemoryFilesystem) -> Vec<PathBuf> {
    fs.list_files()
        .into_iter()
        .filter(|p| p.extension().is_some_and(|e| e == "css"))
        .collect()
}

#[test]
fn style_build_writes_exactly_the_mapped_destinations() {
    let h = harness(false);
    let report = h.pipeline.run(TaskKind::StyleBuild).unwrap();

    assert_eq!(report.artifacts, 3);
    assert_eq!(
        css_outputs(&h.fs),
        [
            PathBuf::from(format!("{OUT}/assets/css/blog.css")),
            PathBuf::from(format!("{OUT}/assets/css/main.css")),
            PathBuf::from(format!("{OUT}/assets/css/resume.css")),
        ]
    );
    let jobs = h.lessc.jobs.lock().unwrap();
    assert!(jobs.iter().all(|j| j.strict_imports));
    assert_eq!(jobs[0].include_paths, [PathBuf::from(format!("{ROOT}/_assets/less"))]);
}

#[test]
fn missing_partial_fails_the_style_build() {
    let h = harness(false);
    h.fs.remove_all(Path::new(&format!("{ROOT}/_assets/less/variables.less")))
        .unwrap();

    let err = h.pipeline.run_named("less-build").unwrap_err();
    assert!(matches!(
        err,
        SiteKitError::Application(ApplicationError::MissingImport { .. })
    ));
    assert_eq!(err.category(), ErrorCategory::Validation);
    assert!(css_outputs(&h.fs).is_empty());
}

#[test]
fn site_build_empties_output_before_generating() {
    let h = harness(false);
    h.pipeline.run_named("jekyll-build").unwrap();

    let seen = h.jekyll.seen_before_run.lock().unwrap().clone().unwrap();
    // Only the hidden git checkout survives.
    assert_eq!(seen, [PathBuf::from(format!("{OUT}/.git"))]);
    assert!(h.fs.read_file(format!("{OUT}/.git/HEAD")).is_some());
    assert!(h.fs.read_file(format!("{OUT}/stale.html")).is_none());
    assert!(h.fs.read_file(format!("{OUT}/index.html")).is_some());
    assert_eq!(css_outputs(&h.fs).len(), 3);
    assert!(h.fs.read_file(format!("{OUT}/assets/js/keep.txt")).is_some());
}

#[test]
fn generator_failure_stops_the_chain() {
    let h = harness(true);
    let err = h.pipeline.run(TaskKind::SiteBuild).unwrap_err();

    assert_eq!(err.category(), ErrorCategory::External);
    assert_eq!(*h.jekyll.calls.lock().unwrap(), 1);
    assert!(h.lessc.jobs.lock().unwrap().is_empty());
    assert!(css_outputs(&h.fs).is_empty());
    assert!(h.fs.read_file(format!("{OUT}/assets/js/keep.txt")).is_none());
}

#[test]
fn asset_copy_preserves_relative_paths() {
    let h = harness(false);
    h.pipeline.run(TaskKind::AssetCopy).unwrap();

    assert_eq!(
        h.fs.read_file(format!("{OUT}/assets/images/x/y.png")).as_deref(),
        Some("png")
    );
    // Non-destructive: unrelated output files stay.
    assert!(h.fs.read_file(format!("{OUT}/stale.html")).is_some());
    // Stylesheet sources are not assets.
    assert!(h.fs.read_file(format!("{OUT}/assets/less/main.less")).is_none());
}

#[test]
fn one_missing_group_does_not_block_the_rest() {
    let h = harness(false);
    h.fs.remove_all(Path::new(&format!("{ROOT}/_assets/font"))).unwrap();

    let err = h.pipeline.run(TaskKind::AssetCopy).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::NotFound);
    assert!(h.fs.read_file(format!("{OUT}/assets/images/x/y.png")).is_some());
    assert!(
        h.fs
            .read_file(format!("{OUT}/assets/scala_is_faster_than_java/keep.txt"))
            .is_some()
    );
}

#[test]
fn less_change_triggers_only_the_style_task() {
    let h = harness(false);
    let changes = ScriptedChanges(VecDeque::from([vec![PathBuf::from(format!(
        "{ROOT}/_assets/main.less"
    ))]]));
    let pipeline = h.pipeline.with_change_source(Box::new(changes));

    let mut triggered = Vec::new();
    pipeline
        .watch(|event| {
            if let WatchEvent::Triggered { task, .. } = event {
                triggered.push(task);
            }
        })
        .unwrap();

    assert_eq!(triggered, [TaskKind::StyleBuild]);
    assert_eq!(h.lessc.jobs.lock().unwrap().len(), 3);
    assert_eq!(*h.jekyll.calls.lock().unwrap(), 0);
    assert!(h.fs.read_file(format!("{OUT}/assets/js/keep.txt")).is_none());
}

#[test]
fn each_watch_group_triggers_its_own_task() {
    let h = harness(false);
    let changes = ScriptedChanges(VecDeque::from([
        vec![PathBuf::from(format!("{ROOT}/_assets/js/app.js"))],
        vec![PathBuf::from(format!("{ROOT}/_posts/2014-02-01-hello.md"))],
    ]));
    let pipeline = h.pipeline.with_change_source(Box::new(changes));

    let mut completed = Vec::new();
    pipeline
        .watch(|event| {
            if let WatchEvent::Completed { task, .. } = event {
                completed.push(task);
            }
        })
        .unwrap();

    assert_eq!(completed, [TaskKind::AssetCopy, TaskKind::SiteBuild]);
    assert_eq!(*h.jekyll.calls.lock().unwrap(), 1);
}

#[test]
fn idle_watch_never_builds() {
    let h = harness(false);
    let pipeline = h
        .pipeline
        .with_change_source(Box::new(ScriptedChanges(VecDeque::new())));

    let report = pipeline.run_named("default").unwrap();
    assert_eq!(report.task, TaskKind::Watch);
    assert!(h.lessc.jobs.lock().unwrap().is_empty());
    assert_eq!(*h.jekyll.calls.lock().unwrap(), 0);
    assert!(h.fs.read_file(format!("{OUT}/stale.html")).is_some());
}
