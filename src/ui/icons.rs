pub struct Icons;

impl Icons {
    pub const ROCKET: &str = "🚀";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const SKIP: &str = "⏭️";
    pub const NEW: &str = "✨";
    pub const MOD: &str = "📝";
    pub const SAME: &str = "·";
    pub const GEAR: &str = "⚙️";
}
