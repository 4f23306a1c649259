use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;

use bingwall_core::{
    fetch_wallpaper, ArchiveConfig, Clock, Notification, Notifier, Resolution, RetryPolicy,
    Transport, WallpaperApplier, WallpaperError,
};

const METADATA_BODY: &[u8] =
    br#"{"images":[{"title":"T","copyright":"C","urlbase":"/th?id=OHR.Foo"}]}"#;

struct ScriptedTransport {
    script: RefCell<VecDeque<Result<Vec<u8>, WallpaperError>>>,
    calls: Cell<u32>,
}

impl ScriptedTransport {
    fn new(script: Vec<Result<Vec<u8>, WallpaperError>>) -> Self {
        ScriptedTransport {
            script: RefCell::new(script.into()),
            calls: Cell::new(0),
        }
    }
}

impl Transport for ScriptedTransport {
    fn fetch(&self, _url: &str, _timeout: Duration) -> Result<Vec<u8>, WallpaperError> {
        self.calls.set(self.calls.get() + 1);
        self.script
            .borrow_mut()
            .pop_front()
            .expect("transport called more often than scripted")
    }
}

struct NoSleep;

impl Clock for NoSleep {
    fn sleep(&self, _duration: Duration) {}
}

#[derive(Default)]
struct RecordingApplier {
    applied: RefCell<Vec<PathBuf>>,
}

impl WallpaperApplier for RecordingApplier {
    fn apply(&self, image: &Path) -> Result<(), WallpaperError> {
        self.applied.borrow_mut().push(image.to_path_buf());
        Ok(())
    }
}

#[derive(Default)]
struct RecordingNotifier {
    titles: RefCell<Vec<String>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, note: &Notification<'_>) -> std::io::Result<()> {
        self.titles.borrow_mut().push(note.title.to_string());
        Ok(())
    }
}

fn may_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

#[test]
fn full_run_produces_the_documented_url_and_path() {
    let dir = tempfile::tempdir().unwrap();
    let transport = ScriptedTransport::new(vec![
        Ok(METADATA_BODY.to_vec()),
        Ok(b"jpegbytes".to_vec()),
    ]);

    let result = fetch_wallpaper(
        &ArchiveConfig::default(),
        RetryPolicy::default(),
        &transport,
        &NoSleep,
        Resolution::R1920x1080,
        may_day(),
        dir.path(),
    )
    .unwrap();

    assert_eq!(result.title, "T");
    assert_eq!(result.copyright, "C");
    assert_eq!(result.url, "https://cn.bing.com/th?id=OHR.Foo_1920x1080.jpg");
    assert!(result
        .local_path
        .ends_with("bing_wallpaper_20240501_1920x1080.jpg"));
    assert_eq!(result.resolution, Resolution::R1920x1080);
    assert_eq!(fs::read(&result.local_path).unwrap(), b"jpegbytes");
    // One metadata call plus one image attempt.
    assert_eq!(transport.calls.get(), 2);
}

#[test]
fn same_day_rerun_overwrites_one_stable_file() {
    let dir = tempfile::tempdir().unwrap();

    let first = ScriptedTransport::new(vec![
        Ok(METADATA_BODY.to_vec()),
        Ok(b"morning".to_vec()),
    ]);
    let first_result = fetch_wallpaper(
        &ArchiveConfig::default(),
        RetryPolicy::default(),
        &first,
        &NoSleep,
        Resolution::Uhd,
        may_day(),
        dir.path(),
    )
    .unwrap();

    let second = ScriptedTransport::new(vec![
        Ok(METADATA_BODY.to_vec()),
        Ok(b"evening".to_vec()),
    ]);
    let second_result = fetch_wallpaper(
        &ArchiveConfig::default(),
        RetryPolicy::default(),
        &second,
        &NoSleep,
        Resolution::Uhd,
        may_day(),
        dir.path(),
    )
    .unwrap();

    assert_eq!(first_result.local_path, second_result.local_path);
    assert_eq!(fs::read(&second_result.local_path).unwrap(), b"evening");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn metadata_failure_aborts_before_any_image_attempt() {
    let dir = tempfile::tempdir().unwrap();
    let transport = ScriptedTransport::new(vec![Ok(b"<html>oops</html>".to_vec())]);

    let err = fetch_wallpaper(
        &ArchiveConfig::default(),
        RetryPolicy::default(),
        &transport,
        &NoSleep,
        Resolution::Uhd,
        may_day(),
        dir.path(),
    )
    .unwrap_err();

    assert!(matches!(err, WallpaperError::Schema(_)));
    // The scripted queue held a single response; a retry or an image fetch
    // would have panicked the stub.
    assert_eq!(transport.calls.get(), 1);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn transient_image_failures_are_absorbed_by_the_retry_budget() {
    let dir = tempfile::tempdir().unwrap();
    let transport = ScriptedTransport::new(vec![
        Ok(METADATA_BODY.to_vec()),
        Err(WallpaperError::HttpStatus(502)),
        Err(WallpaperError::Network("connection reset".to_string())),
        Ok(b"jpegbytes".to_vec()),
    ]);

    let result = fetch_wallpaper(
        &ArchiveConfig::default(),
        RetryPolicy::default(),
        &transport,
        &NoSleep,
        Resolution::R1366x768,
        may_day(),
        dir.path(),
    )
    .unwrap();

    assert_eq!(transport.calls.get(), 4);
    assert_eq!(fs::read(&result.local_path).unwrap(), b"jpegbytes");
}

#[test]
fn applier_and_notifier_see_the_finished_result() {
    let dir = tempfile::tempdir().unwrap();
    let transport = ScriptedTransport::new(vec![
        Ok(METADATA_BODY.to_vec()),
        Ok(b"jpegbytes".to_vec()),
    ]);

    let result = fetch_wallpaper(
        &ArchiveConfig::default(),
        RetryPolicy::default(),
        &transport,
        &NoSleep,
        Resolution::R1920x1080,
        may_day(),
        dir.path(),
    )
    .unwrap();

    // The caller-side hand-off: apply first, then notify, as the CLI does.
    let applier = RecordingApplier::default();
    applier.apply(&result.local_path).unwrap();

    let notifier = RecordingNotifier::default();
    notifier
        .notify(&Notification {
            title: &result.title,
            icon: &result.local_path,
            message: &result.copyright,
            url: &result.url,
        })
        .unwrap();

    assert_eq!(*applier.applied.borrow(), vec![result.local_path.clone()]);
    assert_eq!(*notifier.titles.borrow(), vec!["T".to_string()]);
}
