// src/handlers/ui.rs
use axum::{response::Html, routing::get, Router};

pub fn ui_routes() -> Router {
    Router::new().route("/", get(index_page))
}

pub async fn index_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Narrated Video Generator</title>
    <style>
        body { font-family: Arial, sans-serif; max-width: 720px; margin: 40px auto; padding: 20px; }
        .drop-zone { border: 2px dashed #ccc; border-radius: 10px; padding: 30px; text-align: center; cursor: pointer; }
        .drop-zone.over { border-color: #00c896; background: #f3fffb; }
        #preview { max-width: 100%; max-height: 240px; margin-top: 10px; display: none; }
        textarea { width: 100%; min-height: 120px; margin: 16px 0; }
        button { background: #00c896; color: white; padding: 10px 20px; border: none; border-radius: 5px; cursor: pointer; }
        button:disabled { background: #999; cursor: wait; }
        .toast { margin-top: 16px; padding: 10px; border-radius: 5px; display: none; }
        .toast.default { background: #e9fff6; }
        .toast.destructive { background: #ffecec; }
        #download { display: none; margin-top: 16px; }
    </style>
</head>
<body>
    <h1>🎬 Narrated Video Generator</h1>

    <div class="drop-zone" id="dropZone">
        <p>Drop an image here or click to choose one</p>
        <input type="file" id="fileInput" accept="image/*" style="display: none;">
        <img id="preview" alt="preview">
    </div>

    <textarea id="narration" placeholder="Type the narration for your video..."></textarea>
    <button id="generate">Generate Video</button>

    <div class="toast" id="toast"></div>
    <a id="download" target="_blank" rel="noopener">⬇️ Download video</a>

    <script>
        const dropZone = document.getElementById('dropZone');
        const fileInput = document.getElementById('fileInput');
        const preview = document.getElementById('preview');
        const narration = document.getElementById('narration');
        const button = document.getElementById('generate');
        const toast = document.getElementById('toast');
        const download = document.getElementById('download');

        function showToast(n) {
            if (!n) { toast.style.display = 'none'; return; }
            toast.className = 'toast ' + n.variant;
            toast.innerHTML = '<strong></strong><br><span></span>';
            toast.querySelector('strong').textContent = n.title;
            toast.querySelector('span').textContent = n.description;
            toast.style.display = 'block';
        }

        async function selectFile(file) {
            if (!file || !file.type.startsWith('image/')) return;
            const form = new FormData();
            form.append('image', file);
            const res = await fetch('/api/image', { method: 'POST', body: form });
            if (res.ok) {
                preview.src = URL.createObjectURL(file);
                preview.style.display = 'block';
            }
        }

        dropZone.addEventListener('click', () => fileInput.click());
        dropZone.addEventListener('dragover', (e) => { e.preventDefault(); dropZone.classList.add('over'); });
        dropZone.addEventListener('dragleave', () => dropZone.classList.remove('over'));
        dropZone.addEventListener('drop', (e) => {
            e.preventDefault();
            dropZone.classList.remove('over');
            selectFile(e.dataTransfer.files[0]);
        });
        fileInput.addEventListener('change', (e) => selectFile(e.target.files[0]));

        narration.addEventListener('change', () => fetch('/api/narration', {
            method: 'PUT',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify({ text: narration.value }),
        }));

        button.addEventListener('click', async () => {
            await fetch('/api/narration', {
                method: 'PUT',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify({ text: narration.value }),
            });
            button.disabled = true;
            button.textContent = 'Generating...';
            download.style.display = 'none';
            showToast(null);
            try {
                const res = await fetch('/api/generate', { method: 'POST' });
                const data = await res.json();
                showToast(data.notification);
                if (data.success) {
                    download.href = data.video_url;
                    download.style.display = 'inline-block';
                }
            } catch (err) {
                showToast({ title: 'Error', description: 'Something went wrong. Please try again.', variant: 'destructive' });
            } finally {
                button.disabled = false;
                button.textContent = 'Generate Video';
            }
        });
    </script>
</body>
</html>
"#;
