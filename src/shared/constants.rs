/// Validation message shown on the file input when the attachment is rejected
pub const FILE_FORMAT_ERROR: &str = "Le fichier doit être au format jpg, jpeg ou png";

/// Share of the modal width given to the preview image
pub const PREVIEW_WIDTH_RATIO: f64 = 0.5;

// =============================================================================
// ERROR PAGE EXPLANATIONS
// =============================================================================

pub const EXPLANATION_NOT_FOUND: &str = "La ressource demandée est introuvable.";

pub const EXPLANATION_SERVER: &str =
    "Le serveur a rencontré une erreur. Veuillez réessayer plus tard.";

pub const EXPLANATION_UNAUTHORIZED: &str =
    "Votre session a expiré ou vous n'avez pas accès à cette ressource.";

pub const EXPLANATION_NETWORK: &str =
    "Impossible de joindre le serveur. Vérifiez votre connexion.";

pub const EXPLANATION_DECODE: &str = "La réponse du serveur est illisible.";
