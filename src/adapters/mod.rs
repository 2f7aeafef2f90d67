// Adapters layer: concrete order stores.

pub mod local;
pub mod supabase;

pub use local::LocalFileStore;
pub use supabase::SupabaseStore;
