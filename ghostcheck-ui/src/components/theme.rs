//! Theme
//!
//! Dark panel look shared by every page, as Tailwind class strings.

pub const PAGE: &str = "min-h-screen w-full p-7 box-border bg-[#070b14] text-white overflow-x-hidden";
pub const CONTAINER: &str = "max-w-[1240px] mx-auto w-full box-border";

pub const PANEL: &str = "border border-[#243046] rounded-[18px] p-[18px] bg-[#0b1220] \
                         shadow-[0_10px_30px_rgba(0,0,0,0.35)] box-border min-w-0";
pub const DIVIDER: &str = "h-px bg-white/5 my-3.5";

pub const FIELD: &str = "w-full max-w-full p-3 rounded-xl border border-[#243046] bg-[#0b1220] \
                         text-white outline-none box-border focus:border-[#8ab4ff]";
pub const LABEL: &str = "block text-xs opacity-75 mb-1.5";

pub const DANGER_PANEL: &str = "border border-[#5a2330] rounded-[18px] p-4 bg-[#1a0c12] mb-4 \
                                shadow-[0_10px_30px_rgba(0,0,0,0.35)] box-border min-w-0";

pub const BUTTON: &str = "px-3.5 py-2.5 rounded-xl border text-white transition duration-100 \
                          box-border max-w-full disabled:opacity-60 disabled:cursor-not-allowed";

pub const LINK: &str = "text-[#8ab4ff]";

/// Button look
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Ghost,
}

impl ButtonVariant {
    pub fn class(self) -> String {
        let variant = match self {
            ButtonVariant::Primary => "bg-[#13213a] border-[#243046] hover:bg-[#1a2c4d]",
            ButtonVariant::Ghost => "bg-transparent border-[#243046] hover:bg-white/5",
        };
        format!("{} {}", BUTTON, variant)
    }
}
