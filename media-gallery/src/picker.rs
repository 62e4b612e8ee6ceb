// Platform-specific media bridge
//
// On Android this module talks to the host activity over JNI to query the
// media store, launch the camera and broker the read-media permission. The
// activity reports results through static getters which are polled here. On
// other platforms the bridge functions return platform errors.

use crate::models::{MediaKind, MediaRecord};
use chrono::DateTime;
use serde::{Deserialize, Serialize};

#[cfg(target_os = "android")]
use crate::models::{CaptureMode, CaptureOutcome};
#[cfg(target_os = "android")]
use crate::source::{MediaSource, MediaSourceError};
#[cfg(target_os = "android")]
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum PickerError {
    PermissionDenied(String),
    Timeout(String),
    Cancelled(String),
    PlatformNotSupported(String),
    Other(String),
}

impl std::fmt::Display for PickerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PickerError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            PickerError::Timeout(msg) => write!(f, "Timeout: {}", msg),
            PickerError::Cancelled(msg) => write!(f, "Cancelled: {}", msg),
            PickerError::PlatformNotSupported(msg) => write!(f, "Platform not supported: {}", msg),
            PickerError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for PickerError {}

const DEFAULT_MAIN_ACTIVITY_CLASS: &str = "dev/dioxus/main/MainActivity";

/// Poll attempts at 100ms each, 60 seconds in total
#[cfg(target_os = "android")]
const POLL_ATTEMPTS: usize = 600;

#[cfg(target_os = "android")]
use jni::objects::{JClass, JObject, JString, JValue};

#[cfg(target_os = "android")]
use ndk_context::android_context;

/// Configuration for the bridge on Android
///
/// This allows customization of the MainActivity class name for different apps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AndroidPickerConfig {
    /// Fully qualified class name in slash format (e.g., "com/example/myapp/MainActivity")
    pub main_activity_class: String,
}

impl Default for AndroidPickerConfig {
    fn default() -> Self {
        Self {
            main_activity_class: DEFAULT_MAIN_ACTIVITY_CLASS.to_string(),
        }
    }
}

/// Parses the media store rows returned by the activity
///
/// One record per line: `uri<TAB>type<TAB>epoch seconds`. Seconds may carry a
/// fractional part. Malformed lines are skipped.
///
/// The activity reports absolute file paths (the `DATA` column), not
/// `content://` URIs, so thumbnails can read the files directly.
pub fn parse_media_rows(rows: &str) -> Vec<MediaRecord> {
    rows.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let mut fields = line.split('\t');
            let uri = fields.next()?.trim();
            let host_type = fields.next()?;
            let seconds: f64 = match fields.next()?.trim().parse() {
                Ok(s) => s,
                Err(_) => {
                    log::warn!("Skipping media row with bad timestamp: {}", line);
                    return None;
                }
            };
            if uri.is_empty() || !seconds.is_finite() {
                log::warn!("Skipping malformed media row: {}", line);
                return None;
            }
            let whole = seconds.floor();
            let nanos = ((seconds - whole) * 1_000_000_000.0) as u32;
            let captured_at = DateTime::from_timestamp(whole as i64, nanos)?;
            Some(MediaRecord::new(
                uri,
                MediaKind::from_host_type(host_type),
                captured_at,
            ))
        })
        .collect()
}

#[cfg(target_os = "android")]
fn java_vm() -> Result<jni::JavaVM, PickerError> {
    let vm_ptr = android_context().vm() as *mut *const jni::sys::JNIInvokeInterface_;
    unsafe { jni::JavaVM::from_raw(vm_ptr) }
        .map_err(|e| PickerError::Other(format!("JavaVM failed: {}", e)))
}

#[cfg(target_os = "android")]
fn get_app_class_loader<'a>(env: &mut jni::JNIEnv<'a>) -> Result<JObject<'a>, PickerError> {
    // ActivityThread.currentActivityThread()
    let at_cls = env
        .find_class("android/app/ActivityThread")
        .map_err(|e| PickerError::Other(format!("ActivityThread not found: {}", e)))?;
    let at = env
        .call_static_method(
            &at_cls,
            "currentActivityThread",
            "()Landroid/app/ActivityThread;",
            &[],
        )
        .map_err(|e| PickerError::Other(format!("currentActivityThread failed: {}", e)))?
        .l()
        .map_err(|e| PickerError::Other(format!("currentActivityThread invalid: {}", e)))?;

    // Prefer application class loader
    let app = env
        .call_method(&at, "getApplication", "()Landroid/app/Application;", &[])
        .map_err(|e| PickerError::Other(format!("getApplication failed: {}", e)))?
        .l()
        .map_err(|e| PickerError::Other(format!("getApplication invalid: {}", e)))?;

    let context = if app.is_null() {
        // Fallback: system context
        env.call_method(&at, "getSystemContext", "()Landroid/app/ContextImpl;", &[])
            .map_err(|e| PickerError::Other(format!("getSystemContext failed: {}", e)))?
            .l()
            .map_err(|e| PickerError::Other(format!("getSystemContext invalid: {}", e)))?
    } else {
        app
    };

    env.call_method(&context, "getClassLoader", "()Ljava/lang/ClassLoader;", &[])
        .map_err(|e| PickerError::Other(format!("getClassLoader failed: {}", e)))?
        .l()
        .map_err(|e| PickerError::Other(format!("getClassLoader invalid: {}", e)))
}

#[cfg(target_os = "android")]
fn load_class<'a>(
    env: &mut jni::JNIEnv<'a>,
    loader: &JObject<'a>,
    fq_slash: &str,
) -> Result<JClass<'a>, PickerError> {
    // ClassLoader.loadClass wants dotted names
    let fq_dot = fq_slash.replace('/', ".");
    let name: JString = env
        .new_string(fq_dot)
        .map_err(|e| PickerError::Other(format!("new_string failed: {}", e)))?;
    let cls_obj = env
        .call_method(
            loader,
            "loadClass",
            "(Ljava/lang/String;)Ljava/lang/Class;",
            &[JValue::Object(&JObject::from(name))],
        )
        .map_err(|e| PickerError::Other(format!("ClassLoader.loadClass failed: {}", e)))?
        .l()
        .map_err(|e| PickerError::Other(format!("loadClass invalid: {}", e)))?;
    Ok(JClass::from(cls_obj))
}

#[cfg(target_os = "android")]
fn companion_instance<'a>(
    env: &mut jni::JNIEnv<'a>,
    cls: &JClass<'a>,
    config: &AndroidPickerConfig,
    signature: &str,
) -> Result<JObject<'a>, PickerError> {
    let comp_signature = format!("L{}$Companion;", config.main_activity_class);
    let comp_obj = env
        .get_static_field(cls, "Companion", &comp_signature)
        .map_err(|e| PickerError::Other(format!("Failed to get Companion field: {}", e)))?
        .l()
        .map_err(|e| PickerError::Other(format!("Companion field invalid: {}", e)))?;

    if comp_obj.is_null() {
        return Err(PickerError::Other(
            "MainActivity.Companion is null, activity not initialized?".to_string(),
        ));
    }

    env.call_method(&comp_obj, "getInstance", signature, &[])
        .map_err(|e| PickerError::Other(format!("Companion.getInstance() failed: {}", e)))?
        .l()
        .map_err(|e| PickerError::Other(format!("Companion.getInstance() invalid: {}", e)))
}

#[cfg(target_os = "android")]
fn get_activity_instance<'a>(
    env: &mut jni::JNIEnv<'a>,
    config: &AndroidPickerConfig,
) -> Result<(JObject<'a>, JClass<'a>), PickerError> {
    let loader = get_app_class_loader(env)?;
    let cls = load_class(env, &loader, &config.main_activity_class)?;

    let signature = format!("()L{};", config.main_activity_class);

    // Static helper generated by `@JvmStatic`, then the `instance` field, then Companion
    let instance = match env.call_static_method(&cls, "getInstance", &signature, &[]) {
        Ok(val) => val
            .l()
            .map_err(|e| PickerError::Other(format!("getInstance() invalid: {}", e)))?,
        Err(_err) => {
            if env.exception_check().unwrap_or(false) {
                let _ = env.exception_clear();
            }

            match env.get_static_field(&cls, "instance", &signature) {
                Ok(field) => {
                    let inst = field
                        .l()
                        .map_err(|e| PickerError::Other(format!("instance field invalid: {}", e)))?;
                    if inst.is_null() {
                        companion_instance(env, &cls, config, &signature)?
                    } else {
                        inst
                    }
                }
                Err(_) => {
                    if env.exception_check().unwrap_or(false) {
                        let _ = env.exception_clear();
                    }
                    companion_instance(env, &cls, config, &signature)?
                }
            }
        }
    };

    if instance.is_null() {
        return Err(PickerError::Other(
            "MainActivity instance is null - Activity not initialized?".to_string(),
        ));
    }

    Ok((instance, cls))
}

#[cfg(target_os = "android")]
fn static_string<'a>(
    env: &mut jni::JNIEnv<'a>,
    cls: &JClass<'a>,
    method: &str,
) -> Result<Option<String>, PickerError> {
    let obj = match env
        .call_static_method(cls, method, "()Ljava/lang/String;", &[])
        .and_then(|v| v.l())
    {
        Ok(obj) => obj,
        Err(_) => return Ok(None),
    };
    if obj.is_null() {
        return Ok(None);
    }
    let value: String = env
        .get_string((&obj).into())
        .map_err(|e| PickerError::Other(format!("String conversion failed: {}", e)))?
        .into();
    Ok(Some(value))
}

/// Polls the activity until it reports a captured path, a cancellation or an error
#[cfg(target_os = "android")]
fn wait_for_capture<'a>(
    env: &mut jni::JNIEnv<'a>,
    cls: &JClass<'a>,
) -> Result<PathBuf, PickerError> {
    for _ in 0..POLL_ATTEMPTS {
        std::thread::sleep(std::time::Duration::from_millis(100));

        if let Some(path) = static_string(env, cls, "getLastPhotoPath")? {
            return Ok(PathBuf::from(path));
        }

        let cancelled = env
            .call_static_method(cls, "wasCancelled", "()Z", &[])
            .and_then(|v| v.z())
            .unwrap_or(false);
        if cancelled {
            return Err(PickerError::Cancelled("Capture dismissed".to_string()));
        }

        if let Some(err) = static_string(env, cls, "getLastError")? {
            return Err(PickerError::Other(err));
        }
    }

    Err(PickerError::Timeout(
        "Camera timeout - no media captured".to_string(),
    ))
}

/// Queries up to `limit` most recent media store entries
#[cfg(target_os = "android")]
pub fn query_recent_media(
    config: &AndroidPickerConfig,
    limit: usize,
) -> Result<Vec<MediaRecord>, PickerError> {
    let vm = java_vm()?;
    let mut env = vm
        .attach_current_thread()
        .map_err(|e| PickerError::Other(format!("JNI attach failed: {}", e)))?;

    let (activity, _cls) = get_activity_instance(&mut env, config)?;

    let limit = i32::try_from(limit).unwrap_or(i32::MAX);
    let obj = env
        .call_method(
            &activity,
            "queryRecentMedia",
            "(I)Ljava/lang/String;",
            &[JValue::Int(limit)],
        )
        .map_err(|e| PickerError::Other(format!("queryRecentMedia failed: {}", e)))?
        .l()
        .map_err(|e| PickerError::Other(format!("queryRecentMedia invalid: {}", e)))?;

    if obj.is_null() {
        return Err(PickerError::PermissionDenied(
            "Media store query returned nothing".to_string(),
        ));
    }

    let rows: String = env
        .get_string((&obj).into())
        .map_err(|e| PickerError::Other(format!("String conversion failed: {}", e)))?
        .into();
    Ok(parse_media_rows(&rows))
}

/// Launches the camera for `mode` and waits up to 60 seconds for the result
#[cfg(target_os = "android")]
pub fn capture_media(
    config: &AndroidPickerConfig,
    mode: CaptureMode,
) -> Result<PathBuf, PickerError> {
    let vm = java_vm()?;
    let mut env = vm
        .attach_current_thread()
        .map_err(|e| PickerError::Other(format!("JNI attach failed: {}", e)))?;

    let (activity, main_cls) = get_activity_instance(&mut env, config)?;

    env.call_static_method(&main_cls, "clearLastError", "()V", &[])
        .map_err(|e| PickerError::Other(format!("clearLastError failed: {}", e)))?;

    let launcher = match mode {
        CaptureMode::Photo => "launchCamera",
        CaptureMode::Video => "launchVideoCapture",
    };
    env.call_method(&activity, launcher, "()V", &[])
        .map_err(|e| PickerError::Other(format!("{} failed: {}", launcher, e)))?;

    wait_for_capture(&mut env, &main_cls)
}

/// Check if reading media is permitted
#[cfg(target_os = "android")]
pub fn has_media_permission(config: &AndroidPickerConfig) -> Result<bool, PickerError> {
    let vm = java_vm()?;
    let mut env = vm
        .attach_current_thread()
        .map_err(|e| PickerError::Other(format!("JNI attach failed: {}", e)))?;

    let (activity, _cls) = get_activity_instance(&mut env, config)?;

    env.call_method(&activity, "hasMediaPermission", "()Z", &[])
        .map_err(|e| PickerError::Other(format!("hasMediaPermission failed: {}", e)))?
        .z()
        .map_err(|e| PickerError::Other(format!("Boolean conversion failed: {}", e)))
}

/// Shows the permission dialog and waits for the user's answer
///
/// The activity reports -1 while the dialog is open, 0 for denied, 1 for granted.
#[cfg(target_os = "android")]
pub fn request_media_permission(config: &AndroidPickerConfig) -> Result<bool, PickerError> {
    let vm = java_vm()?;
    let mut env = vm
        .attach_current_thread()
        .map_err(|e| PickerError::Other(format!("JNI attach failed: {}", e)))?;

    let (activity, main_cls) = get_activity_instance(&mut env, config)?;

    env.call_method(&activity, "requestMediaPermission", "()V", &[])
        .map_err(|e| PickerError::Other(format!("requestMediaPermission failed: {}", e)))?;

    for _ in 0..POLL_ATTEMPTS {
        std::thread::sleep(std::time::Duration::from_millis(100));

        let status = env
            .call_static_method(&main_cls, "getPermissionResult", "()I", &[])
            .and_then(|v| v.i())
            .map_err(|e| PickerError::Other(format!("getPermissionResult failed: {}", e)))?;
        match status {
            1 => return Ok(true),
            0 => return Ok(false),
            _ => {}
        }
    }

    Err(PickerError::Timeout(
        "Permission dialog timeout - no answer".to_string(),
    ))
}

/// Media source backed by the Android media store and camera
///
/// Every bridge call blocks while polling, so it runs on tokio's blocking pool.
#[cfg(target_os = "android")]
#[derive(Debug, Clone, Default)]
pub struct AndroidMediaSource {
    config: AndroidPickerConfig,
}

#[cfg(target_os = "android")]
impl AndroidMediaSource {
    pub fn new(config: AndroidPickerConfig) -> Self {
        Self { config }
    }
}

#[cfg(target_os = "android")]
async fn run_blocking<T, F>(f: F) -> Result<T, PickerError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, PickerError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| PickerError::Other(format!("Bridge task failed: {}", e)))?
}

#[cfg(target_os = "android")]
impl MediaSource for AndroidMediaSource {
    async fn list_recent(&self, limit: usize) -> Result<Vec<MediaRecord>, MediaSourceError> {
        let config = self.config.clone();
        let records = run_blocking(move || query_recent_media(&config, limit)).await?;
        log::debug!("Media store returned {} records", records.len());
        Ok(records)
    }

    async fn capture(&self, mode: CaptureMode) -> Result<CaptureOutcome, MediaSourceError> {
        let config = self.config.clone();
        match run_blocking(move || capture_media(&config, mode)).await {
            Ok(path) => {
                let kind = MediaKind::from_extension(&path).unwrap_or(MediaKind::Unknown);
                log::info!("Captured {:?} at {}", kind, path.display());
                Ok(CaptureOutcome::Captured(MediaRecord::new(
                    path.to_string_lossy(),
                    kind,
                    chrono::Utc::now(),
                )))
            }
            Err(PickerError::Cancelled(msg)) => {
                log::debug!("Capture cancelled: {}", msg);
                Ok(CaptureOutcome::Cancelled)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn check_and_request_access(&self) -> bool {
        let config = self.config.clone();
        let result = run_blocking(move || {
            if has_media_permission(&config)? {
                return Ok(true);
            }
            log::info!("Media permission missing, asking the user");
            request_media_permission(&config)
        })
        .await;

        match result {
            Ok(granted) => granted,
            Err(e) => {
                log::error!("Media permission check failed: {}", e);
                false
            }
        }
    }
}

// Non-Android implementations (stubs that return platform errors)
#[cfg(not(target_os = "android"))]
pub fn query_recent_media(
    _config: &AndroidPickerConfig,
    _limit: usize,
) -> Result<Vec<MediaRecord>, PickerError> {
    Err(PickerError::PlatformNotSupported(
        "Media store not available on this platform".to_string(),
    ))
}

#[cfg(not(target_os = "android"))]
pub fn has_media_permission(_config: &AndroidPickerConfig) -> Result<bool, PickerError> {
    Ok(false)
}
