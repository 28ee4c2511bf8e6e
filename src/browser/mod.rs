//! 浏览器会话的获取：启动本地浏览器或连接到已有浏览器

pub mod connection;
pub mod headless;
pub mod session;

pub use connection::connect_to_browser;
pub use headless::launch_headless_browser;
pub use session::{ChromeSession, SessionOrigin};
