mod posts;
mod tumblelog;

pub use posts::build_post;
pub use tumblelog::assemble;
