use bevy::asset::{io::Reader, ron, Asset, AssetLoader, LoadContext};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::marker::PhantomData;
use thiserror::Error;

/// 可以从 RON 文本直接反序列化的资产，扩展名决定由哪个 Loader 处理
pub trait RonAsset: Asset + DeserializeOwned {
    const EXTENSIONS: &'static [&'static str];
}

pub struct RonAssetLoader<A> {
    _marker: PhantomData<fn() -> A>,
}

impl<A> Default for RonAssetLoader<A> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

#[derive(Debug, Error)]
pub enum RonLoaderError {
    #[error("Could not load asset: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not parse RON: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("Could not interpret bytes as UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

pub fn parse_ron<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, RonLoaderError> {
    let s = std::str::from_utf8(bytes)?;
    Ok(ron::de::from_str(s)?)
}

impl<A: RonAsset> AssetLoader for RonAssetLoader<A> {
    type Asset = A;
    type Settings = ();
    type Error = RonLoaderError;

    fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext,
    ) -> impl Future<Output = Result<Self::Asset, Self::Error>> + Send {
        async move {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes).await?;
            parse_ron(&bytes)
        }
    }

    fn extensions(&self) -> &[&str] {
        A::EXTENSIONS
    }
}
