//! Toast notifications through the WinRT `ToastNotificationManager`.
//!
//! Unpackaged executables have no AppUserModelID of their own, so toasts
//! are posted under the one PowerShell registers at install time.

use autolaunch_core::{Notifier, NotifyError};

#[cfg_attr(not(windows), allow(dead_code))]
const POWERSHELL_APP_ID: &str =
    r"{1AC14E77-02E7-4E5D-B744-2EB1AE5198B7}\WindowsPowerShell\v1.0\powershell.exe";

/// Shows each notification as a Windows toast.
#[derive(Debug, Default, Clone, Copy)]
pub struct ToastNotifier;

impl Notifier for ToastNotifier {
    fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        show(&toast_xml(title, message))
    }
}

#[cfg(windows)]
fn show(xml: &str) -> Result<(), NotifyError> {
    use windows::Data::Xml::Dom::XmlDocument;
    use windows::UI::Notifications::{ToastNotification, ToastNotificationManager};
    use windows::core::HSTRING;

    let inner = || -> windows::core::Result<()> {
        let doc = XmlDocument::new()?;
        doc.LoadXml(&HSTRING::from(xml))?;
        let toast = ToastNotification::CreateToastNotification(&doc)?;
        ToastNotificationManager::CreateToastNotifierWithId(&HSTRING::from(POWERSHELL_APP_ID))?
            .Show(&toast)
    };
    inner().map_err(|e| NotifyError(e.message().to_string()))
}

#[cfg(not(windows))]
fn show(_xml: &str) -> Result<(), NotifyError> {
    Ok(())
}

/// Builds a two-line `ToastGeneric` payload.
fn toast_xml(title: &str, message: &str) -> String {
    format!(
        "<toast><visual><binding template=\"ToastGeneric\">\
         <text>{}</text><text>{}</text>\
         </binding></visual></toast>",
        escape(title),
        escape(message)
    )
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
