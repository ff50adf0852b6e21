//! Stylesheet injected into the page for ten-foot viewing.

/// Class placeholder replaced by the configured marker class.
const MARKER: &str = "{marker}";

const TV_STYLESHEET: &str = r#"
.{marker} {
    transform: scale(1.05) !important;
    transition: all 0.2s ease !important;
    z-index: 1000 !important;
    position: relative !important;
    box-shadow: 0 0 20px rgba(255, 107, 107, 0.6) !important;
    visibility: visible !important;
    opacity: 1 !important;
}

a.{marker}, button.{marker} {
    background-color: rgba(255, 107, 107, 0.2) !important;
    border-radius: 8px !important;
    padding: 8px !important;
}

[href*="/movie/"].{marker},
[href*="/tv/"].{marker} {
    transform: scale(1.1) !important;
    box-shadow: 0 0 30px rgba(255, 107, 107, 0.8) !important;
}

.{marker} img {
    filter: brightness(1.2) !important;
}

.{marker}::before {
    content: '';
    position: absolute;
    top: -5px;
    right: -5px;
    width: 10px;
    height: 10px;
    background: #ff6b6b;
    border-radius: 50%;
    z-index: 1001;
}

video {
    outline: none !important;
}

video:focus {
    box-shadow: 0 0 20px rgba(255, 255, 255, 0.5) !important;
}

::-webkit-scrollbar {
    width: 8px;
}

::-webkit-scrollbar-track {
    background: rgba(0, 0, 0, 0.1);
}

::-webkit-scrollbar-thumb {
    background: rgba(255, 107, 107, 0.6);
    border-radius: 4px;
}

button, .btn {
    min-height: 44px !important;
    min-width: 44px !important;
    font-size: 16px !important;
}
"#;

/// The TV stylesheet with focus rules bound to `marker_class`.
pub fn tv_stylesheet(marker_class: &str) -> String {
    TV_STYLESHEET.replace(MARKER, marker_class)
}
