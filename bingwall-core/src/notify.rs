use std::io;
use std::path::Path;

/// Payload for the "wallpaper changed" notification.
#[derive(Debug)]
pub struct Notification<'a> {
    pub title: &'a str,
    /// Shown as the notification icon; the freshly downloaded image.
    pub icon: &'a Path,
    pub message: &'a str,
    /// Opened when the user activates the notification.
    pub url: &'a str,
}

/// Best-effort delivery. Callers log failures and move on; a lost
/// notification never fails the run.
pub trait Notifier {
    fn notify(&self, note: &Notification<'_>) -> io::Result<()>;
}

pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    #[cfg(target_os = "windows")]
    fn notify(&self, note: &Notification<'_>) -> io::Result<()> {
        use std::process::Command;

        // Toast through the Explorer AppID; plain powershell is the only
        // dependency-free way to reach the WinRT notification API.
        let script = format!(
            r#"
Add-Type -AssemblyName System.Runtime.WindowsRuntime
[Windows.UI.Notifications.ToastNotificationManager, Windows.UI.Notifications, ContentType = WindowsRuntime] | Out-Null
[Windows.Data.Xml.Dom.XmlDocument, Windows.Data.Xml.Dom, ContentType = WindowsRuntime] | Out-Null
$AppID = "Microsoft.Windows.Explorer"
$ToastXml = @"
<toast activationType="protocol" launch="{url}">
    <visual>
        <binding template="ToastGeneric">
            <text>{title}</text>
            <image placement="appLogoOverride" src="{icon}"/>
            <text>{message}</text>
        </binding>
    </visual>
</toast>
"@
$XmlDocument = New-Object Windows.Data.Xml.Dom.XmlDocument
$XmlDocument.LoadXml($ToastXml)
$Toast = [Windows.UI.Notifications.ToastNotification]::new($XmlDocument)
[Windows.UI.Notifications.ToastNotificationManager]::CreateToastNotifier($AppID).Show($Toast)
"#,
            url = note.url,
            title = note.title,
            icon = note.icon.display(),
            message = note.message,
        );
        let status = Command::new("powershell")
            .args(["-ExecutionPolicy", "Bypass", "-NoProfile", "-Command"])
            .arg(script)
            .status()?;
        if !status.success() {
            return Err(io::Error::other(format!(
                "powershell exited with {status}"
            )));
        }
        Ok(())
    }

    #[cfg(not(target_os = "windows"))]
    fn notify(&self, note: &Notification<'_>) -> io::Result<()> {
        use std::process::Command;

        let status = Command::new("notify-send")
            .arg("-i")
            .arg(note.icon)
            .arg(note.title)
            .arg(format!("{}\n{}", note.message, note.url))
            .status()?;
        if !status.success() {
            return Err(io::Error::other(format!(
                "notify-send exited with {status}"
            )));
        }
        Ok(())
    }
}
