pub mod ballistics;
pub mod damage;
pub mod physics;
pub mod window;
