pub use self::scene::Scene;

mod scene;
