use crate::events::notification::SurfaceNotification;

pub trait SurfaceListener: Send + Sync {
    fn notify(&self, notification: &SurfaceNotification);
}
