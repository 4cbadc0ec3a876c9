use vitrine_scene::VoxelGrid;

/// The voxel volume on the GPU: a single-channel byte texture of
/// extent N³, filled by one bulk upload and never written again.
///
/// `R8Uint` keeps the material bytes exact; the shader reads cells
/// with `textureLoad`, so no sampler or filtering is involved and
/// out-of-volume reads are guarded in the shader itself.
pub struct VoxelTexture {
    view: wgpu::TextureView,
}

impl VoxelTexture {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, grid: &VoxelGrid) -> Self {
        let side = grid.side();
        let size = wgpu::Extent3d {
            width: side,
            height: side,
            depth_or_array_layers: side,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("voxel_volume"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D3,
            format: wgpu::TextureFormat::R8Uint,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        // Grid bytes are already in row-then-layer order (x fastest).
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            grid.data(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(side),
                rows_per_image: Some(side),
            },
            size,
        );

        tracing::debug!(side, bytes = grid.data().len(), "voxel volume uploaded");

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("voxel_volume_view"),
            dimension: Some(wgpu::TextureViewDimension::D3),
            ..Default::default()
        });

        Self { view }
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }
}
