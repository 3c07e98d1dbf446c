// Engine modules: asset loading

pub mod assets;
