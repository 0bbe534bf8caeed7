//! Concrete `DeviceInterface` backed by adb subprocesses (C13), wrapping the
//! blocking `crate::adb` primitives in `tokio::task::spawn_blocking` so a
//! session's device calls never stall a tokio worker thread.

use async_trait::async_trait;

use crate::adb::{self, AdbError};

use super::DeviceInterface;

#[derive(Debug, Clone)]
pub struct AdbDevice {
    device_id: Option<String>,
}

impl AdbDevice {
    pub fn new(device_id: Option<String>) -> Self {
        AdbDevice { device_id }
    }
}

fn join_error(e: tokio::task::JoinError) -> AdbError {
    AdbError::CommandFailed(format!("blocking adb task panicked: {e}"))
}

#[async_trait]
impl DeviceInterface for AdbDevice {
    async fn tap(&self, x: i32, y: i32) -> Result<(), AdbError> {
        let device_id = self.device_id.clone();
        tokio::task::spawn_blocking(move || adb::tap(x, y, device_id.as_deref(), None))
            .await
            .map_err(join_error)
    }

    async fn long_press(&self, x: i32, y: i32, duration_ms: u64) -> Result<(), AdbError> {
        let device_id = self.device_id.clone();
        tokio::task::spawn_blocking(move || adb::long_press(x, y, Some(duration_ms), device_id.as_deref(), None))
            .await
            .map_err(join_error)
    }

    async fn double_tap(&self, x: i32, y: i32) -> Result<(), AdbError> {
        let device_id = self.device_id.clone();
        tokio::task::spawn_blocking(move || adb::double_tap(x, y, device_id.as_deref(), None))
            .await
            .map_err(join_error)
    }

    async fn swipe(
        &self,
        start_x: i32,
        start_y: i32,
        end_x: i32,
        end_y: i32,
        duration_ms: Option<u64>,
    ) -> Result<(), AdbError> {
        let device_id = self.device_id.clone();
        tokio::task::spawn_blocking(move || {
            adb::swipe(start_x, start_y, end_x, end_y, duration_ms, device_id.as_deref(), None)
        })
        .await
        .map_err(join_error)
    }

    async fn type_text(&self, text: &str) -> Result<(), AdbError> {
        let device_id = self.device_id.clone();
        let text = text.to_string();
        tokio::task::spawn_blocking(move || adb::input::type_text(&text, device_id.as_deref()))
            .await
            .map_err(join_error)
    }

    async fn clear_text(&self) -> Result<(), AdbError> {
        let device_id = self.device_id.clone();
        tokio::task::spawn_blocking(move || adb::input::clear_text(device_id.as_deref()))
            .await
            .map_err(join_error)
    }

    async fn back(&self) -> Result<(), AdbError> {
        let device_id = self.device_id.clone();
        tokio::task::spawn_blocking(move || adb::back(device_id.as_deref(), None))
            .await
            .map_err(join_error)
    }

    async fn home(&self) -> Result<(), AdbError> {
        let device_id = self.device_id.clone();
        tokio::task::spawn_blocking(move || adb::home(device_id.as_deref(), None))
            .await
            .map_err(join_error)
    }

    async fn recent(&self) -> Result<(), AdbError> {
        let device_id = self.device_id.clone();
        tokio::task::spawn_blocking(move || adb::recent(device_id.as_deref(), None))
            .await
            .map_err(join_error)
    }

    async fn press_key(&self, key: &str) -> Result<(), AdbError> {
        let device_id = self.device_id.clone();
        let key = key.to_string();
        tokio::task::spawn_blocking(move || adb::press_key(&key, device_id.as_deref(), None))
            .await
            .map_err(join_error)
    }

    async fn launch_app(&self, app_name: &str) -> Result<String, AdbError> {
        let device_id = self.device_id.clone();
        let app_name = app_name.to_string();
        tokio::task::spawn_blocking(move || adb::launch_app(&app_name, device_id.as_deref(), None))
            .await
            .map_err(join_error)
    }

    async fn screenshot(&self) -> Result<(String, u32, u32), AdbError> {
        let device_id = self.device_id.clone();
        let shot = tokio::task::spawn_blocking(move || adb::get_screenshot(device_id.as_deref()))
            .await
            .map_err(join_error)?;
        Ok((shot.base64_data, shot.width, shot.height))
    }

    async fn current_app(&self) -> Result<String, AdbError> {
        let device_id = self.device_id.clone();
        tokio::task::spawn_blocking(move || adb::get_current_app(device_id.as_deref()))
            .await
            .map_err(join_error)
    }
}
