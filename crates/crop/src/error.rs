use std::io;

#[derive(Debug, thiserror::Error)]
pub enum CropError {
    #[error("no file provided")]
    NoFile,
    #[error("file exceeds the {max_mb} MB limit")]
    TooLarge { max_mb: f64 },
    #[error("file is not an image")]
    NotAnImage,
    #[error("image decode failed: {0}")]
    Decode(String),
    #[error("failed to read file: {0}")]
    Read(#[from] io::Error),
    #[error("crop container is not visible or smaller than the minimum size")]
    ContainerNotReady,
    #[error("no image prepared for this crop area")]
    NotPrepared,
    #[error("no crop selection to save")]
    NoSelection,
    #[error("image encode failed: {0}")]
    Encode(String),
}

impl CropError {
    /// Text for the error dialog shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::NoFile => "Nenhum arquivo fornecido".to_string(),
            Self::TooLarge { max_mb } => {
                format!("Arquivo muito grande! Tamanho maximo: {max_mb}MB")
            }
            Self::NotAnImage => "Por favor, selecione um arquivo de imagem valido.".to_string(),
            Self::Decode(_) => "Erro ao carregar a imagem".to_string(),
            Self::Read(_) => "Erro ao ler o arquivo".to_string(),
            Self::ContainerNotReady | Self::NotPrepared => {
                "A imagem ainda nao esta pronta para recorte.".to_string()
            }
            Self::NoSelection => "Por favor, selecione uma imagem antes de salvar.".to_string(),
            Self::Encode(_) => "Erro ao processar a imagem".to_string(),
        }
    }

    /// Dialog title matching [`user_message`](Self::user_message).
    pub fn title(&self) -> &'static str {
        match self {
            Self::TooLarge { .. } => "Arquivo Muito Grande",
            Self::NotAnImage => "Tipo de Arquivo Invalido",
            Self::NoSelection => "Nenhuma Imagem Selecionada",
            _ => "Erro ao Processar Imagem",
        }
    }
}
