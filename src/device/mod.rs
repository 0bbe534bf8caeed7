//! Device Interface (C10) and its concrete adb-backed implementation (C13).

mod adb_device;

pub use adb_device::AdbDevice;

use async_trait::async_trait;

use crate::adb::AdbError;

/// Abstract contract the Agent Loop and Step Executor depend on — never the
/// concrete adb subprocess calls directly. Grounded in
/// `other_examples/a1233713_arthur-zhang-autoglm-rs`'s `device_factory`
/// abstraction rather than the reference crate's free functions, which this
/// expansion keeps as the underlying implementation detail of `AdbDevice`.
#[async_trait]
pub trait DeviceInterface: Send + Sync {
    async fn tap(&self, x: i32, y: i32) -> Result<(), AdbError>;
    async fn long_press(&self, x: i32, y: i32, duration_ms: u64) -> Result<(), AdbError>;
    async fn double_tap(&self, x: i32, y: i32) -> Result<(), AdbError>;
    async fn swipe(&self, start_x: i32, start_y: i32, end_x: i32, end_y: i32, duration_ms: Option<u64>) -> Result<(), AdbError>;
    async fn type_text(&self, text: &str) -> Result<(), AdbError>;
    async fn clear_text(&self) -> Result<(), AdbError>;
    async fn back(&self) -> Result<(), AdbError>;
    async fn home(&self) -> Result<(), AdbError>;
    async fn recent(&self) -> Result<(), AdbError>;
    async fn press_key(&self, key: &str) -> Result<(), AdbError>;
    async fn launch_app(&self, app_name: &str) -> Result<String, AdbError>;
    async fn screenshot(&self) -> Result<(String, u32, u32), AdbError>;
    async fn current_app(&self) -> Result<String, AdbError>;
}
